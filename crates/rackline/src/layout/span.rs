//! Span detection: which devices sit where in a row.

use std::collections::HashSet;

use log::warn;

use rackline_core::{device::DeviceRef, metrics::DeviceMetrics};

/// A device occupying a contiguous run of columns in a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Item {
    pub device: DeviceRef,
    pub start_column: usize,
    pub span_columns: usize,
}

impl Item {
    /// First column after the item.
    pub fn end_column(&self) -> usize {
        self.start_column + self.span_columns
    }
}

/// Scans `row` left to right and returns one [`Item`] per device, ordered by
/// start column.
///
/// The span of each device comes from its width class; all covered columns
/// are marked visited so a multi-column device is reported once. Columns
/// beyond `columns_per_row` are ignored.
pub(super) fn detect_spans(
    row: &[Option<DeviceRef>],
    columns_per_row: usize,
    metrics: &DeviceMetrics,
) -> Vec<Item> {
    if row.len() > columns_per_row {
        warn!(
            row_len = row.len(),
            columns_per_row;
            "Row has more cells than columns, ignoring the excess"
        );
    }

    let mut visited = vec![false; columns_per_row];
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for (column, cell) in row.iter().enumerate().take(columns_per_row) {
        let Some(device) = cell else {
            continue;
        };
        if visited[column] || !seen.insert(device.id()) {
            continue;
        }

        let mut span = metrics.column_span(device.width_class(), columns_per_row);
        if column + span > columns_per_row {
            warn!(
                device = device.id().to_string(),
                column,
                span;
                "Device overruns the row, truncating its span"
            );
            span = columns_per_row - column;
        }

        visited[column..column + span].fill(true);
        items.push(Item {
            device: *device,
            start_column: column,
            span_columns: span,
        });
    }

    items
}
