//! Seam distribution: spreading leftover row width over internal seams.

use log::trace;

use super::{edge::EdgeDecision, pad::Pads};

/// Final width of every internal seam of a row.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SeamPlan {
    /// Width consumed before distribution.
    pub used: f32,
    /// Leftover row width, never negative.
    pub remaining: f32,
    /// Width added to every internal seam.
    pub extra_per_seam: f32,
    /// Base pad plus `extra_per_seam`, one entry per adjacent device pair.
    pub seams: Vec<f32>,
}

/// Spreads the unused row width uniformly across internal seams.
///
/// Edge pads are fixed by the empty columns they stand for and are never
/// stretched. A row holding a single device has no seams, so its leftover
/// stays undistributed until reconciliation.
pub(super) fn distribute_seams(
    row_width: f32,
    pads: &Pads,
    decisions: &[EdgeDecision],
) -> SeamPlan {
    let devices: f32 = decisions
        .iter()
        .map(|d| d.face_width + d.left_wing + d.right_wing)
        .sum();
    let internal: f32 = pads.internal.iter().sum();
    let used = pads.leading + pads.trailing + devices + internal;

    let remaining = (row_width - used).max(0.0);
    let seam_count = pads.internal.len();
    let extra_per_seam = if seam_count > 0 {
        remaining / seam_count as f32
    } else {
        0.0
    };

    trace!(used, remaining, extra_per_seam, seam_count; "Distributed seams");

    SeamPlan {
        used,
        remaining,
        extra_per_seam,
        seams: pads.internal.iter().map(|base| base + extra_per_seam).collect(),
    }
}
