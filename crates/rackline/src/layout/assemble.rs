//! Layout assembly and reconciliation.

use log::{debug, trace, warn};

use rackline_core::metrics::DeviceMetrics;

use super::{
    RECONCILE_TOLERANCE, edge::EdgeDecision, invariants::CONSERVATION_TOLERANCE, seam::SeamPlan,
    slot::SlotLayout, snap, span::Item,
};

/// Builds the final slot list of a row.
///
/// Each internal seam is split evenly between its two neighbours; edge pads
/// turn into rails only on sides without a wing. Offsets accumulate left to
/// right. Finally, any residual between the row width and the summed slot
/// widths is folded into the last slot's total width, leaving every earlier
/// slot untouched.
pub(super) fn assemble(
    items: &[Item],
    decisions: &[EdgeDecision],
    plan: &SeamPlan,
    row_width: f32,
    metrics: &DeviceMetrics,
) -> Vec<SlotLayout> {
    let last_index = items.len().saturating_sub(1);

    let mut slots: Vec<SlotLayout> = items
        .iter()
        .zip(decisions)
        .enumerate()
        .map(|(index, (item, decision))| {
            let left_rail = match index.checked_sub(1) {
                Some(seam) => snap(plan.seams[seam] * 0.5),
                None => decision.left_edge_rail,
            };
            let right_rail = if index == last_index {
                decision.right_edge_rail
            } else {
                snap(plan.seams[index] * 0.5)
            };

            let total_width = decision.face_width
                + decision.left_wing
                + decision.right_wing
                + left_rail
                + right_rail;

            SlotLayout {
                device: item.device,
                start_column: item.start_column,
                span_columns: item.span_columns,
                x_offset: 0.0,
                face_width: decision.face_width,
                total_width,
                left_wing: decision.left_wing,
                right_wing: decision.right_wing,
                left_rail,
                right_rail,
                height: metrics.device_height(&item.device),
                is_left_edge: index == 0,
                is_right_edge: index == last_index,
            }
        })
        .collect();

    reconcile(&mut slots, row_width);

    let mut x_offset = 0.0;
    for slot in &mut slots {
        slot.x_offset = x_offset;
        x_offset += slot.total_width;
    }

    slots
}

/// Folds the residual row width into the last slot.
///
/// Residuals above [`RECONCILE_TOLERANCE`] are logged as a correction; any
/// smaller residual beyond [`CONSERVATION_TOLERANCE`] is absorbed silently.
/// An overcommitted row therefore shrinks its last slot; the slot is never
/// shrunk below zero width.
fn reconcile(slots: &mut [SlotLayout], row_width: f32) {
    let sum: f32 = slots.iter().map(|slot| slot.total_width).sum();
    let error = row_width - sum;
    if error.abs() <= CONSERVATION_TOLERANCE {
        return;
    }
    let Some(last) = slots.last_mut() else {
        return;
    };

    let corrected = last.total_width + error;
    if error.abs() > RECONCILE_TOLERANCE {
        debug!(
            device = last.device.id().to_string(),
            error,
            corrected;
            "Reconciling row width on last device"
        );
    } else {
        trace!(
            device = last.device.id().to_string(),
            error;
            "Absorbing rounding residual on last device"
        );
    }

    if error < -RECONCILE_TOLERANCE {
        warn!(
            device = last.device.id().to_string(),
            excess = -error;
            "Row is overcommitted, clipping last device"
        );
    }

    debug_assert!(
        corrected >= 0.0,
        "row overcommitted by {} points, more than the last slot can absorb",
        -error
    );
    last.total_width = corrected.max(0.0);
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rackline_core::{
        device::{DeviceRef, WidthClass},
        identifier::Id,
    };

    use super::*;

    fn item(name: &str, start_column: usize, span_columns: usize) -> Item {
        Item {
            device: DeviceRef::new(Id::new(name), WidthClass::Third, 1),
            start_column,
            span_columns,
        }
    }

    fn face(face_width: f32) -> EdgeDecision {
        EdgeDecision {
            face_width,
            ..EdgeDecision::default()
        }
    }

    #[test]
    fn test_seams_split_evenly_and_offsets_accumulate() {
        let items = [item("a", 0, 4), item("b", 4, 4), item("c", 8, 4)];
        let decisions = [face(150.0), face(150.0), face(140.0)];
        let plan = SeamPlan {
            used: 440.0,
            remaining: 40.0,
            extra_per_seam: 20.0,
            seams: vec![20.0, 20.0],
        };
        let slots = assemble(&items, &decisions, &plan, 480.0, &DeviceMetrics::new(20.0));

        assert_approx_eq!(f32, slots[0].right_rail, 10.0);
        assert_approx_eq!(f32, slots[1].left_rail, 10.0);
        assert_approx_eq!(f32, slots[1].right_rail, 10.0);
        assert_approx_eq!(f32, slots[2].left_rail, 10.0);

        assert_eq!(slots[0].x_offset, 0.0);
        assert_approx_eq!(f32, slots[1].x_offset, 160.0);
        assert_approx_eq!(f32, slots[2].x_offset, 330.0);
        assert_approx_eq!(f32, slots[2].end_x(), 480.0);
        assert!(slots[0].is_left_edge && !slots[0].is_right_edge);
        assert!(slots[2].is_right_edge && !slots[2].is_left_edge);
    }

    #[test]
    fn test_small_residual_goes_to_last_slot() {
        let items = [item("a", 0, 12)];
        let plan = SeamPlan {
            used: 479.5,
            remaining: 0.5,
            extra_per_seam: 0.0,
            seams: Vec::new(),
        };
        let slots = assemble(&items, &[face(479.5)], &plan, 480.0, &DeviceMetrics::new(20.0));

        assert_approx_eq!(f32, slots[0].total_width, 480.0);
        assert_approx_eq!(f32, slots[0].face_width, 479.5);
    }

    #[test]
    fn test_float_noise_is_left_alone() {
        let items = [item("a", 0, 12)];
        let plan = SeamPlan {
            used: 479.995,
            remaining: 0.005,
            extra_per_seam: 0.0,
            seams: Vec::new(),
        };
        let slots = assemble(&items, &[face(479.995)], &plan, 480.0, &DeviceMetrics::new(20.0));

        assert_eq!(slots[0].total_width, 479.995);
    }

    #[test]
    fn test_large_residual_goes_to_last_slot() {
        let items = [item("a", 0, 6), item("b", 6, 6)];
        let plan = SeamPlan {
            used: 440.0,
            remaining: 0.0,
            extra_per_seam: 0.0,
            seams: vec![0.0],
        };
        let slots = assemble(
            &items,
            &[face(220.0), face(220.0)],
            &plan,
            400.0,
            &DeviceMetrics::new(20.0),
        );

        assert_approx_eq!(f32, slots[0].total_width, 220.0);
        assert_approx_eq!(f32, slots[1].total_width, 180.0);
        assert_approx_eq!(f32, slots[1].face_width, 220.0);
        assert_approx_eq!(f32, slots[1].end_x(), 400.0);
    }

    #[test]
    fn test_height_comes_from_unit_height() {
        let tall = Item {
            device: DeviceRef::new(Id::new("tall"), WidthClass::Full, 2),
            start_column: 0,
            span_columns: 12,
        };
        let plan = SeamPlan {
            used: 480.0,
            remaining: 0.0,
            extra_per_seam: 0.0,
            seams: Vec::new(),
        };
        let slots = assemble(&[tall], &[face(480.0)], &plan, 480.0, &DeviceMetrics::new(20.0));

        assert_approx_eq!(f32, slots[0].height, 70.0);
    }
}
