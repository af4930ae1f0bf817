//! The row layout engine.

use log::{debug, trace, warn};

use rackline_core::{device::DeviceRef, grid::SlotGrid, metrics::DeviceMetrics};

use super::{
    assemble::assemble,
    edge::decide_edges,
    invariants,
    pad::compute_pads,
    rack::{RackLayout, RowLayout},
    seam::distribute_seams,
    slot::SlotLayout,
    span::detect_spans,
};

/// Computes row layouts for a given set of device metrics.
///
/// The engine holds no state besides its metrics: every call recomputes
/// from scratch and identical inputs always produce identical output.
#[derive(Debug, Clone)]
pub struct RowLayoutEngine {
    metrics: DeviceMetrics,
}

impl RowLayoutEngine {
    pub fn new(metrics: DeviceMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &DeviceMetrics {
        &self.metrics
    }

    /// Lays out one row.
    ///
    /// `row` holds the device (if any) in each column; a device covering
    /// several columns may appear in all of them or only in its first. The
    /// result has one [`SlotLayout`] per device, left to right, whose total
    /// widths add up to `row_width`.
    ///
    /// An empty row, zero columns, or a non-positive row width yield an
    /// empty layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use rackline::layout::RowLayoutEngine;
    /// use rackline_core::{
    ///     device::{DeviceRef, WidthClass},
    ///     identifier::Id,
    ///     metrics::DeviceMetrics,
    /// };
    ///
    /// let engine = RowLayoutEngine::new(DeviceMetrics::new(72.0));
    /// let mut row = vec![None; 12];
    /// row[0] = Some(DeviceRef::new(Id::new("mixer"), WidthClass::Full, 1));
    ///
    /// let slots = engine.compute_row_layout(&row, 12, 19.0 * 72.0);
    /// assert_eq!(slots.len(), 1);
    /// assert_eq!(slots[0].total_width(), 1368.0);
    /// ```
    pub fn compute_row_layout(
        &self,
        row: &[Option<DeviceRef>],
        columns_per_row: usize,
        row_width: f32,
    ) -> Vec<SlotLayout> {
        if columns_per_row == 0 || !row_width.is_finite() || row_width <= 0.0 {
            trace!(columns_per_row, row_width; "Degenerate row, nothing to lay out");
            return Vec::new();
        }

        let items = detect_spans(row, columns_per_row, &self.metrics);
        if items.is_empty() {
            return Vec::new();
        }

        let pads = compute_pads(&items, columns_per_row, row_width);
        let decisions = decide_edges(&items, &pads, &self.metrics);
        let plan = distribute_seams(row_width, &pads, &decisions);
        let slots = assemble(&items, &decisions, &plan, row_width, &self.metrics);

        if cfg!(debug_assertions) {
            for violation in invariants::check_row(&slots, row_width) {
                warn!(violation:% = violation; "Row layout guarantee broken");
            }
        }

        slots
    }

    /// Lays out every row of `grid` at `row_width` points.
    ///
    /// Devices taller than one unit are laid out in their anchor row only.
    /// Rows are stacked top to bottom, each one rack unit high.
    pub fn compute_rack_layout(&self, grid: &SlotGrid, row_width: f32) -> RackLayout {
        let row_height = self.metrics.unit_height_points();

        let rows: Vec<RowLayout> = (0..grid.rows())
            .filter_map(|index| {
                let cells = grid.anchored_row(index)?;
                let slots = self.compute_row_layout(&cells, grid.columns(), row_width);
                trace!(row = index, devices = slots.len(); "Row laid out");
                Some(RowLayout::new(index, index as f32 * row_height, row_height, slots))
            })
            .collect();

        debug!(
            rows = rows.len(),
            devices = rows.iter().map(|row| row.slots().len()).sum::<usize>(),
            revision = grid.revision();
            "Rack layout computed"
        );

        RackLayout::new(rows, row_width)
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rackline_core::{device::WidthClass, identifier::Id};

    use super::*;

    const COLUMNS: usize = 12;

    // ===================
    // Strategies
    // ===================

    /// Standard 19" rack at an integer scale.
    fn engine_strategy() -> impl Strategy<Value = RowLayoutEngine> {
        (1u16..=144).prop_map(|ppi| RowLayoutEngine::new(DeviceMetrics::new(f32::from(ppi))))
    }

    /// Devices packed left to right with random classes and gaps, stopping at
    /// the first one that no longer fits.
    fn row_strategy() -> impl Strategy<Value = Vec<Option<DeviceRef>>> {
        prop::collection::vec((0usize..WidthClass::ALL.len(), 0usize..4), 1..6).prop_map(
            |entries| {
                let metrics = DeviceMetrics::new(72.0);
                let mut row = vec![None; COLUMNS];
                let mut cursor = 0;
                for (index, (class, gap)) in entries.into_iter().enumerate() {
                    let class = WidthClass::ALL[class];
                    let span = metrics.column_span(class, COLUMNS);
                    let start = cursor + gap;
                    if start + span > COLUMNS {
                        break;
                    }
                    let device = DeviceRef::new(Id::numbered("prop", index), class, 1);
                    for cell in &mut row[start..start + span] {
                        *cell = Some(device);
                    }
                    cursor = start + span;
                }
                row
            },
        )
    }

    fn row_width(engine: &RowLayoutEngine) -> f32 {
        engine.metrics().rack_width(19.0)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Conservation, contiguity, wing/rail exclusivity, edge-only wings and
    /// seam symmetry all hold.
    fn check_row_is_valid(
        engine: &RowLayoutEngine,
        row: &[Option<DeviceRef>],
    ) -> Result<(), TestCaseError> {
        let width = row_width(engine);
        let slots = engine.compute_row_layout(row, COLUMNS, width);

        let violations = invariants::check_row(&slots, width);
        prop_assert!(violations.is_empty(), "violations: {violations:?}");
        Ok(())
    }

    /// Every device in the row gets exactly one slot, in column order.
    fn check_one_slot_per_device(
        engine: &RowLayoutEngine,
        row: &[Option<DeviceRef>],
    ) -> Result<(), TestCaseError> {
        let slots = engine.compute_row_layout(row, COLUMNS, row_width(engine));

        let devices: HashSet<_> = row.iter().flatten().map(DeviceRef::id).collect();
        prop_assert_eq!(slots.len(), devices.len());
        prop_assert!(
            slots
                .windows(2)
                .all(|pair| pair[0].start_column() < pair[1].start_column())
        );
        Ok(())
    }

    /// Laying out the same row twice gives identical results.
    fn check_idempotent(
        engine: &RowLayoutEngine,
        row: &[Option<DeviceRef>],
    ) -> Result<(), TestCaseError> {
        let width = row_width(engine);
        let first = engine.compute_row_layout(row, COLUMNS, width);
        let second = engine.compute_row_layout(row, COLUMNS, width);
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Wings and rails are never negative, and faces keep their class width.
    fn check_widths_non_negative(
        engine: &RowLayoutEngine,
        row: &[Option<DeviceRef>],
    ) -> Result<(), TestCaseError> {
        let slots = engine.compute_row_layout(row, COLUMNS, row_width(engine));

        for slot in &slots {
            prop_assert!(slot.left_wing() >= 0.0 && slot.right_wing() >= 0.0);
            prop_assert!(slot.left_rail() >= 0.0 && slot.right_rail() >= 0.0);
            prop_assert_eq!(
                slot.face_width(),
                engine.metrics().face_width(slot.device().width_class())
            );
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn row_is_valid(engine in engine_strategy(), row in row_strategy()) {
            check_row_is_valid(&engine, &row)?;
        }

        #[test]
        fn one_slot_per_device(engine in engine_strategy(), row in row_strategy()) {
            check_one_slot_per_device(&engine, &row)?;
        }

        #[test]
        fn layout_is_idempotent(engine in engine_strategy(), row in row_strategy()) {
            check_idempotent(&engine, &row)?;
        }

        #[test]
        fn widths_non_negative(engine in engine_strategy(), row in row_strategy()) {
            check_widths_non_negative(&engine, &row)?;
        }
    }
}
