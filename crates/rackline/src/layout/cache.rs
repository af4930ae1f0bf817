//! Rack layout caching.
//!
//! Layouts are never patched in place. The cache is either stale or holds
//! the full layout for exactly one set of inputs; any input change makes it
//! stale and the next request recomputes every row.

use log::debug;

use rackline_core::grid::SlotGrid;

use super::{RackLayout, RowLayoutEngine};

/// Inputs a cached layout was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutKey {
    revision: u64,
    rows: usize,
    columns: usize,
    row_width_bits: u32,
    points_per_inch_bits: u32,
}

impl LayoutKey {
    /// Captures the layout inputs of `grid` rendered by `engine` at `row_width`.
    pub fn new(engine: &RowLayoutEngine, grid: &SlotGrid, row_width: f32) -> Self {
        Self {
            revision: grid.revision(),
            rows: grid.rows(),
            columns: grid.columns(),
            row_width_bits: row_width.to_bits(),
            points_per_inch_bits: engine.metrics().points_per_inch().to_bits(),
        }
    }
}

/// Cache state.
#[derive(Debug, Clone, Default)]
pub enum CacheState {
    #[default]
    Stale,
    Fresh { key: LayoutKey, layout: RackLayout },
}

/// Two-state cache for the layout of one grid.
///
/// Keys include the grid revision, so a cache must be used with a single
/// grid for its lifetime.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    state: CacheState,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self.state, CacheState::Fresh { .. })
    }

    /// Drops the cached layout.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Stale;
    }

    /// Returns the cached layout, recomputing it first if any input changed.
    pub fn get_or_compute(
        &mut self,
        engine: &RowLayoutEngine,
        grid: &SlotGrid,
        row_width: f32,
    ) -> &RackLayout {
        let key = LayoutKey::new(engine, grid, row_width);

        let hit = matches!(&self.state, CacheState::Fresh { key: cached, .. } if *cached == key);
        if !hit {
            debug!(revision = grid.revision(), row_width; "Layout cache stale, recomputing");
            self.state = CacheState::Fresh {
                key,
                layout: engine.compute_rack_layout(grid, row_width),
            };
        }

        match &self.state {
            CacheState::Fresh { layout, .. } => layout,
            CacheState::Stale => unreachable!("cache was just refreshed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rackline_core::{
        device::{DeviceRef, WidthClass},
        identifier::Id,
        metrics::DeviceMetrics,
    };

    use super::*;

    fn grid() -> SlotGrid {
        let mut grid = SlotGrid::new(2, 12);
        let cached = DeviceRef::new(Id::new("cached"), WidthClass::Half, 1);
        grid.place(cached, 0, 0, 6).unwrap();
        grid
    }

    #[test]
    fn test_starts_stale() {
        let cache = LayoutCache::new();
        assert!(!cache.is_fresh());
        assert!(matches!(cache.state(), CacheState::Stale));
    }

    #[test]
    fn test_hit_returns_same_layout() {
        let engine = RowLayoutEngine::new(DeviceMetrics::new(72.0));
        let grid = grid();
        let mut cache = LayoutCache::new();

        let first = cache.get_or_compute(&engine, &grid, 1368.0).clone();
        assert!(cache.is_fresh());
        let second = cache.get_or_compute(&engine, &grid, 1368.0).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_mutation_invalidates() {
        let engine = RowLayoutEngine::new(DeviceMetrics::new(72.0));
        let mut grid = grid();
        let mut cache = LayoutCache::new();

        assert_eq!(cache.get_or_compute(&engine, &grid, 1368.0).device_count(), 1);

        let added = DeviceRef::new(Id::new("added"), WidthClass::Half, 1);
        grid.place(added, 0, 6, 6).unwrap();
        assert_eq!(cache.get_or_compute(&engine, &grid, 1368.0).device_count(), 2);
    }

    #[test]
    fn test_scale_and_row_count_changes_invalidate() {
        let mut grid = grid();
        let mut cache = LayoutCache::new();

        let engine = RowLayoutEngine::new(DeviceMetrics::new(72.0));
        let key = LayoutKey::new(&engine, &grid, 1368.0);
        cache.get_or_compute(&engine, &grid, 1368.0);

        let scaled = RowLayoutEngine::new(DeviceMetrics::new(96.0));
        assert_ne!(LayoutKey::new(&scaled, &grid, 1368.0), key);
        let layout = cache.get_or_compute(&scaled, &grid, 19.0 * 96.0);
        assert_eq!(layout.row_width(), 19.0 * 96.0);

        grid.resize_rows(4);
        assert_eq!(cache.get_or_compute(&scaled, &grid, 19.0 * 96.0).rows().len(), 4);
    }

    #[test]
    fn test_invalidate() {
        let engine = RowLayoutEngine::new(DeviceMetrics::new(72.0));
        let mut cache = LayoutCache::new();
        cache.get_or_compute(&engine, &grid(), 1368.0);

        cache.invalidate();
        assert!(!cache.is_fresh());
    }
}
