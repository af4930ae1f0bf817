//! Plain-text layout report.
//!
//! One line per laid-out device, followed by any broken row guarantee:
//!
//! ```text
//! row 0  comp-1         x=0.00  face=630.00  wings=54.00/0.00  rails=0.00/0.00  total=684.00
//! ```

use rackline::layout::{RackLayout, invariants};

/// Formats `layout` as a text report.
pub fn format_report(layout: &RackLayout) -> String {
    let mut out = String::new();

    for row in layout.rows() {
        for slot in row.slots() {
            out.push_str(&format!(
                "row {}  {:<14} x={:.2}  face={:.2}  wings={:.2}/{:.2}  rails={:.2}/{:.2}  \
                 total={:.2}\n",
                row.index(),
                slot.device().id().to_string(),
                slot.x_offset(),
                slot.face_width(),
                slot.left_wing(),
                slot.right_wing(),
                slot.left_rail(),
                slot.right_rail(),
                slot.total_width(),
            ));
        }

        for violation in invariants::check_row(row.slots(), layout.row_width()) {
            out.push_str(&format!("row {}  ! {violation}\n", row.index()));
        }
    }

    out
}
