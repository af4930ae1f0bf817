//! Slot grid: the placement of device instances in a rack.
//!
//! The grid is a `rows × columns` array of optional [`DeviceRef`]s. A device
//! occupies a rectangle of cells: its column span horizontally and its unit
//! height vertically, and every covered cell holds the same handle. The row
//! in which the device's top edge sits is its *anchor* row.
//!
//! Each successful mutation bumps [`SlotGrid::revision`], which downstream
//! caches use to detect staleness.

use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

use crate::{device::DeviceRef, identifier::Id};

/// Errors raised by placement operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("device `{device}` ({span} columns, {height}U) does not fit at ({row}, {column})")]
    DoesNotFit {
        device: Id,
        row: usize,
        column: usize,
        span: usize,
        height: u8,
    },

    #[error("cell ({row}, {column}) is already occupied by `{occupant}`")]
    Occupied { row: usize, column: usize, occupant: Id },

    #[error("device `{0}` is already placed")]
    AlreadyPlaced(Id),

    #[error("device `{0}` is not placed")]
    NotPlaced(Id),
}

/// A placed device together with its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub device: DeviceRef,
    pub row: usize,
    pub column: usize,
}

/// Rows × columns placement grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    columns: usize,
    cells: Vec<Vec<Option<DeviceRef>>>,
    revision: u64,
}

impl SlotGrid {
    /// Creates an empty grid.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            cells: vec![vec![None; columns]; rows],
            revision: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Monotonic counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the cells of row `row`.
    pub fn row(&self, row: usize) -> Option<&[Option<DeviceRef>]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Returns the cells of row `row` with every cell that continues a device
    /// from the row above masked out, leaving only top-anchored devices.
    pub fn anchored_row(&self, row: usize) -> Option<Vec<Option<DeviceRef>>> {
        let cells = self.cells.get(row)?;
        let above = row.checked_sub(1).and_then(|prev| self.cells.get(prev));

        let anchored = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let continued = match (cell, above.and_then(|above| above[column].as_ref())) {
                    (Some(device), Some(upper)) => device.id() == upper.id(),
                    _ => false,
                };
                if continued { None } else { *cell }
            })
            .collect();
        Some(anchored)
    }

    /// Returns the device in cell (`row`, `column`).
    pub fn get(&self, row: usize, column: usize) -> Option<&DeviceRef> {
        self.cells.get(row)?.get(column)?.as_ref()
    }

    /// Returns the anchor cell of device `id`.
    pub fn position(&self, id: Id) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| cell.is_some_and(|device| device.id() == id))
                .map(|column| (row, column))
        })
    }

    /// Lists every placed device with its anchor, in row-major anchor order.
    pub fn placements(&self) -> Vec<Placement> {
        let mut seen = HashSet::new();
        let mut placements = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                if let Some(device) = cell
                    && seen.insert(device.id())
                {
                    placements.push(Placement {
                        device: *device,
                        row,
                        column,
                    });
                }
            }
        }
        placements
    }

    /// Returns true when no device is placed.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    /// Places `device` with its top-left cell at (`row`, `column`), covering
    /// `span` columns and `device.unit_height()` rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::AlreadyPlaced`] if the device is already in the
    /// grid, [`GridError::OutOfBounds`] for an anchor outside the grid,
    /// [`GridError::DoesNotFit`] if the rectangle crosses the grid edge, and
    /// [`GridError::Occupied`] if any covered cell is taken.
    pub fn place(
        &mut self,
        device: DeviceRef,
        row: usize,
        column: usize,
        span: usize,
    ) -> Result<(), GridError> {
        if self.position(device.id()).is_some() {
            return Err(GridError::AlreadyPlaced(device.id()));
        }
        self.fill(device, row, column, span)?;
        self.revision += 1;
        debug!(
            device = device.id().to_string(),
            row,
            column,
            span;
            "Placed device"
        );
        Ok(())
    }

    /// Removes device `id` from every cell it covers.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotPlaced`] if the device is not in the grid.
    pub fn remove(&mut self, id: Id) -> Result<DeviceRef, GridError> {
        let device = self.clear(id).ok_or(GridError::NotPlaced(id))?;
        self.revision += 1;
        debug!(device = id.to_string(); "Removed device");
        Ok(device)
    }

    /// Moves device `id` so its anchor lands at (`row`, `column`).
    ///
    /// The move is atomic: if the target does not accept the device, the grid
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotPlaced`] if the device is not in the grid, or
    /// any error [`SlotGrid::place`] reports for the target.
    pub fn move_device(
        &mut self,
        id: Id,
        row: usize,
        column: usize,
        span: usize,
    ) -> Result<(), GridError> {
        let snapshot = self.cells.clone();
        let device = self.clear(id).ok_or(GridError::NotPlaced(id))?;

        if let Err(err) = self.fill(device, row, column, span) {
            self.cells = snapshot;
            return Err(err);
        }

        self.revision += 1;
        debug!(device = id.to_string(), row, column; "Moved device");
        Ok(())
    }

    /// Changes the number of rows.
    ///
    /// Growing appends empty rows. Shrinking removes every device that
    /// reaches into a dropped row; the removed ids are returned.
    pub fn resize_rows(&mut self, rows: usize) -> Vec<Id> {
        let mut removed = Vec::new();
        if rows < self.cells.len() {
            let cut: HashSet<Id> = self.cells[rows..]
                .iter()
                .flatten()
                .flatten()
                .map(DeviceRef::id)
                .collect();
            for id in cut {
                self.clear(id);
                removed.push(id);
            }
        }
        self.cells.resize(rows, vec![None; self.columns]);
        self.revision += 1;
        debug!(rows, removed = removed.len(); "Resized grid");
        removed
    }

    fn fill(
        &mut self,
        device: DeviceRef,
        row: usize,
        column: usize,
        span: usize,
    ) -> Result<(), GridError> {
        let rows = self.rows();
        if row >= rows || column >= self.columns {
            return Err(GridError::OutOfBounds {
                row,
                column,
                rows,
                columns: self.columns,
            });
        }

        let height = usize::from(device.unit_height());
        if span == 0 || column + span > self.columns || row + height > rows {
            return Err(GridError::DoesNotFit {
                device: device.id(),
                row,
                column,
                span,
                height: device.unit_height(),
            });
        }

        for r in row..row + height {
            for c in column..column + span {
                if let Some(occupant) = self.cells[r][c] {
                    return Err(GridError::Occupied {
                        row: r,
                        column: c,
                        occupant: occupant.id(),
                    });
                }
            }
        }

        for cells in &mut self.cells[row..row + height] {
            for cell in &mut cells[column..column + span] {
                *cell = Some(device);
            }
        }
        trace!(device = device.id().to_string(), height; "Filled cells");
        Ok(())
    }

    fn clear(&mut self, id: Id) -> Option<DeviceRef> {
        let mut found = None;
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_some_and(|device| device.id() == id) {
                found = cell.take();
            }
        }
        found
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::device::WidthClass;

    const ROWS: usize = 4;
    const COLUMNS: usize = 12;

    // ===================
    // Strategies
    // ===================

    /// Placement attempt: (row, column, span, unit height).
    fn attempt_strategy() -> impl Strategy<Value = (usize, usize, usize, u8)> {
        (0..ROWS + 1, 0..COLUMNS + 1, 1..COLUMNS + 1, 1u8..4)
    }

    fn attempts_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize, u8)>> {
        prop::collection::vec(attempt_strategy(), 0..12)
    }

    fn populate(attempts: &[(usize, usize, usize, u8)]) -> (SlotGrid, Vec<(DeviceRef, usize)>) {
        let mut grid = SlotGrid::new(ROWS, COLUMNS);
        let mut placed = Vec::new();
        for (index, &(row, column, span, height)) in attempts.iter().enumerate() {
            let device = DeviceRef::new(Id::numbered("grid-prop", index), WidthClass::Half, height);
            if grid.place(device, row, column, span).is_ok() {
                placed.push((device, span));
            }
        }
        (grid, placed)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every accepted device covers exactly its rectangle, and nothing else
    /// is in the grid.
    fn check_cells_match_placements(
        attempts: &[(usize, usize, usize, u8)],
    ) -> Result<(), TestCaseError> {
        let (grid, placed) = populate(attempts);

        let mut covered = 0;
        for (device, span) in &placed {
            let (row, column) = grid.position(device.id()).expect("placed device has an anchor");
            for r in row..row + usize::from(device.unit_height()) {
                for c in column..column + span {
                    prop_assert_eq!(grid.get(r, c).map(DeviceRef::id), Some(device.id()));
                    covered += 1;
                }
            }
        }

        let occupied = grid.cells.iter().flatten().filter(|cell| cell.is_some()).count();
        prop_assert_eq!(occupied, covered);
        prop_assert_eq!(grid.placements().len(), placed.len());
        Ok(())
    }

    /// A rejected move leaves the grid exactly as it was.
    fn check_failed_move_is_atomic(
        attempts: &[(usize, usize, usize, u8)],
        target: (usize, usize, usize),
    ) -> Result<(), TestCaseError> {
        let (mut grid, placed) = populate(attempts);
        let Some((device, _)) = placed.first() else {
            return Ok(());
        };

        let before = grid.clone();
        let (row, column, span) = target;
        if grid.move_device(device.id(), row, column, span).is_err() {
            prop_assert_eq!(grid, before);
        } else {
            prop_assert_eq!(grid.position(device.id()), Some((row, column)));
        }
        Ok(())
    }

    /// Anchored rows list every device once, in its top row only.
    fn check_anchored_rows(attempts: &[(usize, usize, usize, u8)]) -> Result<(), TestCaseError> {
        let (grid, placed) = populate(attempts);

        for (device, _) in &placed {
            let (anchor, _) = grid.position(device.id()).expect("placed device has an anchor");
            for row in 0..grid.rows() {
                let cells = grid.anchored_row(row).expect("row exists");
                let present = cells.iter().flatten().any(|cell| cell.id() == device.id());
                prop_assert_eq!(present, row == anchor);
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn cells_match_placements(attempts in attempts_strategy()) {
            check_cells_match_placements(&attempts)?;
        }

        #[test]
        fn failed_move_is_atomic(
            attempts in attempts_strategy(),
            target in (0..ROWS + 1, 0..COLUMNS + 1, 1..COLUMNS + 1),
        ) {
            check_failed_move_is_atomic(&attempts, target)?;
        }

        #[test]
        fn anchored_rows_hold_each_device_once(attempts in attempts_strategy()) {
            check_anchored_rows(&attempts)?;
        }
    }
}
