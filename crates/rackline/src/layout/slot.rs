//! Computed per-device geometry.

use rackline_core::device::DeviceRef;

/// Horizontal geometry of one device in a row.
///
/// The slot spans `[x_offset, x_offset + total_width)`. Left to right it
/// holds the left rail or wing, the face, then the right wing or rail; a
/// side never carries both a wing and a rail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub(super) device: DeviceRef,
    pub(super) start_column: usize,
    pub(super) span_columns: usize,
    pub(super) x_offset: f32,
    pub(super) face_width: f32,
    pub(super) total_width: f32,
    pub(super) left_wing: f32,
    pub(super) right_wing: f32,
    pub(super) left_rail: f32,
    pub(super) right_rail: f32,
    pub(super) height: f32,
    pub(super) is_left_edge: bool,
    pub(super) is_right_edge: bool,
}

impl SlotLayout {
    pub fn device(&self) -> &DeviceRef {
        &self.device
    }

    /// First grid column covered by the device.
    pub fn start_column(&self) -> usize {
        self.start_column
    }

    /// Number of grid columns covered by the device.
    pub fn span_columns(&self) -> usize {
        self.span_columns
    }

    /// Left edge of the slot, relative to the row start.
    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn face_width(&self) -> f32 {
        self.face_width
    }

    /// Full width of the slot including wings and rails.
    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    pub fn left_wing(&self) -> f32 {
        self.left_wing
    }

    pub fn right_wing(&self) -> f32 {
        self.right_wing
    }

    pub fn left_rail(&self) -> f32 {
        self.left_rail
    }

    pub fn right_rail(&self) -> f32 {
        self.right_rail
    }

    /// Device height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// True for the first device of the row.
    pub fn is_left_edge(&self) -> bool {
        self.is_left_edge
    }

    /// True for the last device of the row.
    pub fn is_right_edge(&self) -> bool {
        self.is_right_edge
    }

    /// X coordinate where the left wing plate starts.
    pub fn left_wing_x(&self) -> f32 {
        self.x_offset + self.left_rail
    }

    /// X coordinate where the face starts.
    pub fn face_x(&self) -> f32 {
        self.left_wing_x() + self.left_wing
    }

    /// X coordinate where the right wing plate starts.
    pub fn right_wing_x(&self) -> f32 {
        self.face_x() + self.face_width
    }

    /// Right edge of the slot.
    pub fn end_x(&self) -> f32 {
        self.x_offset + self.total_width
    }
}
