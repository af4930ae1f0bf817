//! Wing/rail decision at the row extremes.
//!
//! A wing plate fills the gap between a narrower-than-full face and the rack
//! edge when the device sits right against that edge. Where a real gap of
//! empty columns exists instead, no wing is added and the gap becomes the
//! device's rail. Interior sides never carry wings.

use rackline_core::metrics::DeviceMetrics;

use super::{pad::Pads, snap, span::Item};

/// Face and wing widths of one device, plus the rails it takes from the
/// row's edge pads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct EdgeDecision {
    pub face_width: f32,
    pub left_wing: f32,
    pub right_wing: f32,
    /// Rail taken from the leading pad; only ever set on the first device.
    pub left_edge_rail: f32,
    /// Rail taken from the trailing pad; only ever set on the last device.
    pub right_edge_rail: f32,
}

/// Decides face, wings and edge rails for every item of a row.
pub(super) fn decide_edges(
    items: &[Item],
    pads: &Pads,
    metrics: &DeviceMetrics,
) -> Vec<EdgeDecision> {
    let last_index = items.len().saturating_sub(1);

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let class = item.device.width_class();
            let face_width = metrics.face_width(class);
            let slot_width = item.span_columns as f32 * pads.column_width;
            let slack = (slot_width - face_width).max(0.0);

            let wing_left = index == 0 && !class.is_full() && pads.leading == 0.0;
            let wing_right = index == last_index && !class.is_full() && pads.trailing == 0.0;

            let (left_wing, right_wing) = match (wing_left, wing_right) {
                (true, true) => (snap(slack * 0.5), snap(slack * 0.5)),
                (true, false) => (snap(slack), 0.0),
                (false, true) => (0.0, snap(slack)),
                (false, false) => (0.0, 0.0),
            };

            let left_edge_rail = if index == 0 && left_wing == 0.0 {
                pads.leading
            } else {
                0.0
            };
            let right_edge_rail = if index == last_index && right_wing == 0.0 {
                pads.trailing
            } else {
                0.0
            };

            EdgeDecision {
                face_width,
                left_wing,
                right_wing,
                left_edge_rail,
                right_edge_rail,
            }
        })
        .collect()
}
