//! Post-condition checks for computed rows.
//!
//! [`check_row`] verifies the geometric guarantees of a row layout and
//! reports every violation it finds. The engine runs it in debug builds; the
//! CLI runs it when asked to report.

use std::fmt;

use thiserror::Error;

use super::SlotLayout;

/// Maximum allowed difference between the summed slot widths and the row
/// width.
pub const CONSERVATION_TOLERANCE: f32 = 0.01;

/// Side of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A broken row-layout guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Violation {
    #[error("slot widths sum to {sum}pt, row is {expected}pt")]
    Conservation { sum: f32, expected: f32 },

    #[error("slot {index} starts at {actual}pt, previous slot ends at {expected}pt")]
    Gap {
        index: usize,
        expected: f32,
        actual: f32,
    },

    #[error("slot {index} has both a wing and a rail on its {side} side")]
    WingAndRail { index: usize, side: Side },

    #[error("slot {index} has a {side} wing but is not at that edge of the row")]
    InteriorWing { index: usize, side: Side },

    #[error("seam after slot {index} is split unevenly ({left}pt / {right}pt)")]
    AsymmetricSeam { index: usize, left: f32, right: f32 },
}

/// Checks conservation, contiguity, wing/rail exclusivity, edge-only wings
/// and seam symmetry of one row. An empty row has nothing to check.
pub fn check_row(slots: &[SlotLayout], row_width: f32) -> Vec<Violation> {
    let mut violations = Vec::new();
    if slots.is_empty() {
        return violations;
    }

    let sum: f32 = slots.iter().map(SlotLayout::total_width).sum();
    if (sum - row_width).abs() > CONSERVATION_TOLERANCE {
        violations.push(Violation::Conservation {
            sum,
            expected: row_width,
        });
    }

    if slots[0].x_offset() != 0.0 {
        violations.push(Violation::Gap {
            index: 0,
            expected: 0.0,
            actual: slots[0].x_offset(),
        });
    }

    for (index, slot) in slots.iter().enumerate() {
        if slot.left_wing() > 0.0 && slot.left_rail() != 0.0 {
            violations.push(Violation::WingAndRail {
                index,
                side: Side::Left,
            });
        }
        if slot.right_wing() > 0.0 && slot.right_rail() != 0.0 {
            violations.push(Violation::WingAndRail {
                index,
                side: Side::Right,
            });
        }
        if slot.left_wing() > 0.0 && !(slot.is_left_edge() && slot.x_offset() == 0.0) {
            violations.push(Violation::InteriorWing {
                index,
                side: Side::Left,
            });
        }
        if slot.right_wing() > 0.0 && !slot.is_right_edge() {
            violations.push(Violation::InteriorWing {
                index,
                side: Side::Right,
            });
        }
    }

    for (index, pair) in slots.windows(2).enumerate() {
        let (left, right) = (&pair[0], &pair[1]);

        let expected = left.x_offset() + left.total_width();
        if right.x_offset() != expected {
            violations.push(Violation::Gap {
                index: index + 1,
                expected,
                actual: right.x_offset(),
            });
        }

        if left.right_rail() != right.left_rail() {
            violations.push(Violation::AsymmetricSeam {
                index,
                left: left.right_rail(),
                right: right.left_rail(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use rackline_core::{
        device::{DeviceRef, WidthClass},
        identifier::Id,
    };

    use super::*;

    fn slot(x_offset: f32, total_width: f32) -> SlotLayout {
        SlotLayout {
            device: DeviceRef::new(Id::new("checked"), WidthClass::Half, 1),
            start_column: 0,
            span_columns: 6,
            x_offset,
            face_width: total_width,
            total_width,
            left_wing: 0.0,
            right_wing: 0.0,
            left_rail: 0.0,
            right_rail: 0.0,
            height: 35.0,
            is_left_edge: false,
            is_right_edge: false,
        }
    }

    #[test]
    fn test_empty_row_is_valid() {
        assert!(check_row(&[], 480.0).is_empty());
    }

    #[test]
    fn test_valid_row() {
        let mut slots = [slot(0.0, 240.0), slot(240.0, 240.0)];
        slots[0].is_left_edge = true;
        slots[1].is_right_edge = true;
        assert!(check_row(&slots, 480.0).is_empty());
    }

    #[test]
    fn test_conservation_and_gap() {
        let slots = [slot(0.0, 200.0), slot(210.0, 200.0)];
        let violations = check_row(&slots, 480.0);

        assert!(violations.contains(&Violation::Conservation {
            sum: 400.0,
            expected: 480.0,
        }));
        assert!(violations.contains(&Violation::Gap {
            index: 1,
            expected: 200.0,
            actual: 210.0,
        }));
    }

    #[test]
    fn test_wing_rules() {
        let mut slots = [slot(0.0, 240.0), slot(240.0, 240.0)];
        slots[0].is_left_edge = true;
        slots[0].left_wing = 10.0;
        slots[0].left_rail = 5.0;
        slots[1].left_wing = 10.0;
        slots[1].is_right_edge = true;

        let violations = check_row(&slots, 480.0);
        assert!(violations.contains(&Violation::WingAndRail {
            index: 0,
            side: Side::Left,
        }));
        assert!(violations.contains(&Violation::InteriorWing {
            index: 1,
            side: Side::Left,
        }));
    }

    #[test]
    fn test_asymmetric_seam() {
        let mut slots = [slot(0.0, 240.0), slot(240.0, 240.0)];
        slots[0].right_rail = 4.0;
        slots[1].left_rail = 6.0;

        let violations = check_row(&slots, 480.0);
        assert_eq!(
            violations,
            vec![Violation::AsymmetricSeam {
                index: 0,
                left: 4.0,
                right: 6.0,
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "seam after slot 0 is split unevenly (4pt / 6pt)"
        );
    }
}
