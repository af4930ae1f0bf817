//! Device width classes, templates and placed device handles.

use std::fmt;

use serde::Deserialize;

use crate::identifier::Id;

/// Physical width category of a rack device relative to the full rack width.
///
/// Declaration order runs from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    Full,
    Half,
    Third,
    Quarter,
}

impl WidthClass {
    /// Every width class, widest first.
    pub const ALL: [Self; 4] = [Self::Full, Self::Half, Self::Third, Self::Quarter];

    /// Returns the configuration name of this width class.
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Third => "third",
            Self::Quarter => "quarter",
        }
    }

    /// How many devices of this class fit side by side in one row.
    pub fn per_row(self) -> usize {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Third => 3,
            Self::Quarter => 4,
        }
    }

    /// Face width in inches of a typical device of this class.
    ///
    /// Full-width faces include their mounting ears and cover the whole
    /// 19" rack. Narrower faces leave slack in their slot that wing plates
    /// fill at the rack edges.
    pub fn standard_face_inches(self) -> f32 {
        match self {
            Self::Full => 19.0,
            Self::Half => 8.75,
            Self::Third => 5.75,
            Self::Quarter => 4.25,
        }
    }

    /// Returns true for full-width devices, which never receive wings.
    pub fn is_full(self) -> bool {
        self == Self::Full
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Template data shared by every instance of a device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeviceTemplate {
    width_class: WidthClass,
    #[serde(default = "default_unit_height")]
    unit_height: u8,
}

fn default_unit_height() -> u8 {
    1
}

impl DeviceTemplate {
    /// Creates a template. A unit height of zero is raised to one.
    pub fn new(width_class: WidthClass, unit_height: u8) -> Self {
        Self {
            width_class,
            unit_height: unit_height.max(1),
        }
    }

    pub fn width_class(&self) -> WidthClass {
        self.width_class
    }

    /// Height in rack units (1U = 1.75").
    pub fn unit_height(&self) -> u8 {
        self.unit_height.max(1)
    }
}

/// Handle to a placed device instance.
///
/// Carries everything the layout engine needs about the device and nothing
/// else; it is immutable for the duration of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceRef {
    id: Id,
    width_class: WidthClass,
    unit_height: u8,
}

impl DeviceRef {
    /// Creates a device handle. A unit height of zero is raised to one.
    pub fn new(id: Id, width_class: WidthClass, unit_height: u8) -> Self {
        Self {
            id,
            width_class,
            unit_height: unit_height.max(1),
        }
    }

    /// Creates a device handle from a resolved template.
    pub fn from_template(id: Id, template: DeviceTemplate) -> Self {
        Self::new(id, template.width_class(), template.unit_height())
    }

    /// Returns the instance identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn width_class(&self) -> WidthClass {
        self.width_class
    }

    pub fn unit_height(&self) -> u8 {
        self.unit_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_class_order_is_widest_first() {
        let mut classes = vec![WidthClass::Quarter, WidthClass::Full, WidthClass::Third];
        classes.sort();
        assert_eq!(
            classes,
            vec![WidthClass::Full, WidthClass::Third, WidthClass::Quarter]
        );
    }

    #[test]
    fn test_standard_faces_fit_their_slots() {
        for class in WidthClass::ALL {
            let slot_inches = 19.0 / class.per_row() as f32;
            assert!(
                class.standard_face_inches() <= slot_inches,
                "{class} face does not fit its slot"
            );
        }
    }

    #[test]
    fn test_zero_unit_height_is_raised() {
        let template = DeviceTemplate::new(WidthClass::Half, 0);
        assert_eq!(template.unit_height(), 1);

        let device = DeviceRef::new(Id::new("zero-u"), WidthClass::Half, 0);
        assert_eq!(device.unit_height(), 1);
    }

    #[test]
    fn test_from_template() {
        let template = DeviceTemplate::new(WidthClass::Third, 2);
        let device = DeviceRef::from_template(Id::new("gate-1"), template);

        assert_eq!(device.id(), "gate-1");
        assert_eq!(device.width_class(), WidthClass::Third);
        assert_eq!(device.unit_height(), 2);
    }
}
