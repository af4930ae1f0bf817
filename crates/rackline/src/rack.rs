//! A populated rack: templates, placements and the cached layout.

use rackline_core::{catalog::DeviceCatalog, grid::SlotGrid};

use crate::layout::{CacheState, LayoutCache, LayoutKey, RackLayout, RowLayoutEngine};

/// Device catalog plus the grid its instances are placed in.
///
/// Grid edits go through [`Rack::grid_mut`]; every edit bumps the grid
/// revision, so the next [`Rack::layout`] call recomputes.
#[derive(Debug, Clone)]
pub struct Rack {
    catalog: DeviceCatalog,
    grid: SlotGrid,
    cache: LayoutCache,
}

impl Rack {
    pub fn new(catalog: DeviceCatalog, grid: SlotGrid) -> Self {
        Self {
            catalog,
            grid,
            cache: LayoutCache::new(),
        }
    }

    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SlotGrid {
        &mut self.grid
    }

    /// Returns the layout at `row_width`, reusing the last one when nothing
    /// changed.
    pub fn layout(&mut self, engine: &RowLayoutEngine, row_width: f32) -> &RackLayout {
        self.cache.get_or_compute(engine, &self.grid, row_width)
    }

    /// True when the cached layout matches the current grid.
    pub fn is_layout_fresh(&self, engine: &RowLayoutEngine, row_width: f32) -> bool {
        match self.cache.state() {
            CacheState::Fresh { key, .. } => *key == LayoutKey::new(engine, &self.grid, row_width),
            CacheState::Stale => false,
        }
    }
}
