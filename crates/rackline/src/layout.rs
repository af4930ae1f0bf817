//! Row layout engine.
//!
//! Turns one row of the placement grid into the exact horizontal geometry of
//! every device in it: face width, wing plates, rail seams and x-offsets, such
//! that the emitted widths add up to the physical row width.
//!
//! # Pipeline
//!
//! ```text
//! grid row ([Option<DeviceRef>])
//!     ↓ span       top-anchored device spans
//!     ↓ pad        leading / internal / trailing pads in points
//!     ↓ edge       wing plates vs. rails at the row extremes
//!     ↓ seam       leftover width spread over internal seams
//!     ↓ assemble   SlotLayout list + reconciliation
//! Vec<SlotLayout>
//! ```
//!
//! Every stage is a pure function; [`RowLayoutEngine`] wires them together.
//! [`LayoutCache`] keeps the last rack-wide result until any input changes.

mod assemble;
mod cache;
mod edge;
mod engine;
pub mod invariants;
mod pad;
mod rack;
mod seam;
mod slot;
mod span;

pub use cache::{CacheState, LayoutCache, LayoutKey};
pub use engine::RowLayoutEngine;
pub use rack::{RackLayout, RowLayout};
pub use slot::SlotLayout;

/// Pads, wings and rails at or below this many points snap to exactly zero.
pub const SNAP_EPSILON: f32 = 0.25;

/// Residual row width, in points, above which the last device of a row
/// absorbs the difference.
pub const RECONCILE_TOLERANCE: f32 = 0.75;

/// Snaps near-zero (and negative) widths to exactly zero.
fn snap(value: f32) -> f32 {
    if value <= SNAP_EPSILON { 0.0 } else { value }
}
