//! Pad calculation: empty columns around and between devices, in points.

use log::warn;

use super::{snap, span::Item};

/// Empty space of a row, converted to points and snapped.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Pads {
    /// Width of one grid column.
    pub column_width: f32,
    /// Space before the first device.
    pub leading: f32,
    /// Space between each adjacent pair of devices; `items.len() - 1` entries.
    pub internal: Vec<f32>,
    /// Space after the last device.
    pub trailing: f32,
}

/// Computes the pads around `items` in a row of `columns_per_row` columns
/// spanning `row_width` points.
///
/// `items` must be non-empty and sorted by start column.
pub(super) fn compute_pads(items: &[Item], columns_per_row: usize, row_width: f32) -> Pads {
    let column_width = row_width / columns_per_row as f32;
    let to_points = |units: usize| snap(units as f32 * column_width);

    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Pads {
            column_width,
            leading: 0.0,
            internal: Vec::new(),
            trailing: 0.0,
        };
    };

    let leading = to_points(first.start_column);
    let internal = items
        .windows(2)
        .map(|pair| gap_units(&pair[0], &pair[1]))
        .map(to_points)
        .collect();
    let trailing = to_points(columns_per_row.saturating_sub(last.end_column()));

    Pads {
        column_width,
        leading,
        internal,
        trailing,
    }
}

/// Empty columns between two consecutive items. Overlapping spans count as
/// no gap.
fn gap_units(left: &Item, right: &Item) -> usize {
    right
        .start_column
        .checked_sub(left.end_column())
        .unwrap_or_else(|| {
            warn!(
                left = left.device.id().to_string(),
                right = right.device.id().to_string();
                "Overlapping device spans"
            );
            0
        })
}
