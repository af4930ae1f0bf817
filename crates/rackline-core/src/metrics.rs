//! Device metrics resolution.
//!
//! [`DeviceMetrics`] turns a [`WidthClass`] into physical quantities: the face
//! width in points, the number of grid columns the device occupies, and the
//! height of a device in points. All values scale with a single
//! points-per-inch factor.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::device::{DeviceRef, WidthClass};

/// Height of one rack unit in inches.
pub const RACK_UNIT_INCHES: f32 = 1.75;

/// Slack, in points, allowed when checking that a face fits its columns.
const FIT_TOLERANCE: f32 = 0.01;

/// Physical metrics of one width class.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WidthClassMetrics {
    /// Face width in inches.
    face_inches: f32,

    /// Column span. `None` derives the span from the row's column count.
    #[serde(default)]
    columns: Option<usize>,
}

impl WidthClassMetrics {
    pub fn new(face_inches: f32, columns: Option<usize>) -> Self {
        Self {
            face_inches,
            columns,
        }
    }

    /// Metrics of a typical device of `class`.
    pub fn standard(class: WidthClass) -> Self {
        Self::new(class.standard_face_inches(), None)
    }

    pub fn face_inches(&self) -> f32 {
        self.face_inches
    }

    pub fn columns(&self) -> Option<usize> {
        self.columns
    }
}

/// Lookup table from [`WidthClass`] to [`WidthClassMetrics`].
///
/// The default table maps every class to its standard metrics. Overrides
/// replace single entries, so the table always covers every class.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthClassTable {
    entries: IndexMap<WidthClass, WidthClassMetrics>,
}

impl Default for WidthClassTable {
    fn default() -> Self {
        let entries = WidthClass::ALL
            .into_iter()
            .map(|class| (class, WidthClassMetrics::standard(class)))
            .collect();
        Self { entries }
    }
}

impl WidthClassTable {
    /// Replaces the metrics of `class` (builder style).
    pub fn with_class(mut self, class: WidthClass, metrics: WidthClassMetrics) -> Self {
        self.entries.insert(class, metrics);
        self
    }

    /// Returns the metrics for `class`.
    pub fn get(&self, class: WidthClass) -> WidthClassMetrics {
        self.entries
            .get(&class)
            .copied()
            .unwrap_or_else(|| WidthClassMetrics::standard(class))
    }

    /// Iterates over all entries, widest class first.
    pub fn iter(&self) -> impl Iterator<Item = (WidthClass, WidthClassMetrics)> + '_ {
        self.entries.iter().map(|(class, metrics)| (*class, *metrics))
    }
}

/// Resolves device width classes to physical sizes at a given scale.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMetrics {
    points_per_inch: f32,
    unit_height_inches: f32,
    table: WidthClassTable,
}

impl DeviceMetrics {
    /// Creates a resolver with the standard width-class table.
    pub fn new(points_per_inch: f32) -> Self {
        Self {
            points_per_inch,
            unit_height_inches: RACK_UNIT_INCHES,
            table: WidthClassTable::default(),
        }
    }

    /// Replaces the width-class table (builder style).
    pub fn with_table(mut self, table: WidthClassTable) -> Self {
        self.table = table;
        self
    }

    /// Overrides the height of one rack unit in inches (builder style).
    pub fn with_unit_height_inches(mut self, inches: f32) -> Self {
        self.unit_height_inches = inches;
        self
    }

    pub fn points_per_inch(&self) -> f32 {
        self.points_per_inch
    }

    pub fn table(&self) -> &WidthClassTable {
        &self.table
    }

    /// Face width in points of a device of `class`.
    pub fn face_width(&self, class: WidthClass) -> f32 {
        self.table.get(class).face_inches() * self.points_per_inch
    }

    /// Number of grid columns a device of `class` covers in a row of
    /// `columns_per_row` columns.
    ///
    /// Without an explicit override the span is the row divided evenly by
    /// [`WidthClass::per_row`], never less than one column. The result never
    /// exceeds the row.
    pub fn column_span(&self, class: WidthClass, columns_per_row: usize) -> usize {
        if columns_per_row == 0 {
            return 0;
        }

        let span = self
            .table
            .get(class)
            .columns()
            .unwrap_or(columns_per_row / class.per_row())
            .max(1);

        if span > columns_per_row {
            warn!(
                width_class = class.name(),
                span,
                columns_per_row;
                "Column span exceeds row, clamping"
            );
            return columns_per_row;
        }
        span
    }

    /// Height in points of one rack unit.
    pub fn unit_height_points(&self) -> f32 {
        self.unit_height_inches * self.points_per_inch
    }

    /// Height in points of `device`.
    pub fn device_height(&self, device: &DeviceRef) -> f32 {
        f32::from(device.unit_height()) * self.unit_height_points()
    }

    /// Width in points of a full rack row.
    pub fn rack_width(&self, width_inches: f32) -> f32 {
        width_inches * self.points_per_inch
    }

    /// Returns the first class whose face is wider than the columns it spans,
    /// along with that span.
    pub fn oversized_class(
        &self,
        row_width: f32,
        columns_per_row: usize,
    ) -> Option<(WidthClass, usize)> {
        if columns_per_row == 0 {
            return None;
        }
        let column_width = row_width / columns_per_row as f32;

        WidthClass::ALL.into_iter().find_map(|class| {
            let span = self.column_span(class, columns_per_row);
            let available = span as f32 * column_width;
            (self.face_width(class) > available + FIT_TOLERANCE).then_some((class, span))
        })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::identifier::Id;

    #[test]
    fn test_default_table_covers_every_class() {
        let table = WidthClassTable::default();
        let classes: Vec<_> = table.iter().map(|(class, _)| class).collect();
        assert_eq!(classes, WidthClass::ALL.to_vec());
    }

    #[test]
    fn test_face_width_scales_with_ppi() {
        let metrics = DeviceMetrics::new(72.0);
        assert_approx_eq!(f32, metrics.face_width(WidthClass::Full), 1368.0);
        assert_approx_eq!(f32, metrics.face_width(WidthClass::Half), 630.0);

        let doubled = DeviceMetrics::new(144.0);
        assert_approx_eq!(f32, doubled.face_width(WidthClass::Half), 1260.0);
    }

    #[test]
    fn test_column_span_derived_from_row() {
        let metrics = DeviceMetrics::new(72.0);
        assert_eq!(metrics.column_span(WidthClass::Full, 12), 12);
        assert_eq!(metrics.column_span(WidthClass::Half, 12), 6);
        assert_eq!(metrics.column_span(WidthClass::Third, 12), 4);
        assert_eq!(metrics.column_span(WidthClass::Quarter, 12), 3);
        assert_eq!(metrics.column_span(WidthClass::Quarter, 24), 6);
    }

    #[test]
    fn test_column_span_degenerate_rows() {
        let metrics = DeviceMetrics::new(72.0);
        assert_eq!(metrics.column_span(WidthClass::Half, 0), 0);
        // Two columns cannot hold four quarters; each still takes one column.
        assert_eq!(metrics.column_span(WidthClass::Quarter, 2), 1);
    }

    #[test]
    fn test_column_span_override_is_clamped() {
        let table = WidthClassTable::default()
            .with_class(WidthClass::Half, WidthClassMetrics::new(9.0, Some(20)));
        let metrics = DeviceMetrics::new(72.0).with_table(table);

        assert_eq!(metrics.column_span(WidthClass::Half, 12), 12);
        assert_approx_eq!(f32, metrics.face_width(WidthClass::Half), 648.0);
    }

    #[test]
    fn test_standard_classes_fit_their_spans() {
        let metrics = DeviceMetrics::new(72.0);
        assert_eq!(metrics.oversized_class(1368.0, 12), None);
        assert_eq!(metrics.oversized_class(1368.0, 24), None);
        assert_eq!(DeviceMetrics::new(1.0).oversized_class(19.0, 12), None);
    }

    #[test]
    fn test_oversized_class_detected() {
        let narrow = WidthClassTable::default()
            .with_class(WidthClass::Half, WidthClassMetrics::new(9.5, Some(3)));
        let metrics = DeviceMetrics::new(72.0).with_table(narrow);
        assert_eq!(metrics.oversized_class(1368.0, 12), Some((WidthClass::Half, 3)));

        let wide_third = WidthClassTable::default()
            .with_class(WidthClass::Third, WidthClassMetrics::new(7.0, None));
        let metrics = DeviceMetrics::new(72.0).with_table(wide_third);
        assert_eq!(metrics.oversized_class(1368.0, 12), Some((WidthClass::Third, 4)));
    }

    #[test]
    fn test_device_height() {
        let metrics = DeviceMetrics::new(20.0);
        let device = DeviceRef::new(Id::new("tall"), WidthClass::Full, 3);

        assert_approx_eq!(f32, metrics.unit_height_points(), 35.0);
        assert_approx_eq!(f32, metrics.device_height(&device), 105.0);
    }
}
