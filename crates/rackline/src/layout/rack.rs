//! Rack-wide layout: every row of the grid, stacked vertically.

use rackline_core::identifier::Id;

use super::SlotLayout;

/// Layout of one grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    index: usize,
    y_offset: f32,
    height: f32,
    slots: Vec<SlotLayout>,
}

impl RowLayout {
    pub(super) fn new(index: usize, y_offset: f32, height: f32, slots: Vec<SlotLayout>) -> Self {
        Self {
            index,
            y_offset,
            height,
            slots,
        }
    }

    /// Grid row index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Top edge of the row, relative to the rack top.
    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    /// Height of the row itself (one rack unit). Taller devices anchored in
    /// this row extend below it.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Devices anchored in this row, left to right.
    pub fn slots(&self) -> &[SlotLayout] {
        &self.slots
    }
}

/// Layout of a whole rack.
#[derive(Debug, Clone, PartialEq)]
pub struct RackLayout {
    rows: Vec<RowLayout>,
    row_width: f32,
}

impl RackLayout {
    pub(super) fn new(rows: Vec<RowLayout>, row_width: f32) -> Self {
        Self { rows, row_width }
    }

    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }

    /// Width of every row in points.
    pub fn row_width(&self) -> f32 {
        self.row_width
    }

    /// Total rack height in points.
    pub fn height(&self) -> f32 {
        self.rows.iter().map(RowLayout::height).sum()
    }

    /// Number of laid-out devices.
    pub fn device_count(&self) -> usize {
        self.rows.iter().map(|row| row.slots.len()).sum()
    }

    /// Finds the slot of device `id` together with its row.
    pub fn find(&self, id: Id) -> Option<(&RowLayout, &SlotLayout)> {
        self.rows.iter().find_map(|row| {
            row.slots
                .iter()
                .find(|slot| slot.device().id() == id)
                .map(|slot| (row, slot))
        })
    }
}
