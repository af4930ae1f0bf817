//! Configuration types for rack layout and rendering.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining rack and style settings.
//! - [`RackConfig`] - Physical rack dimensions, scale and width-class overrides.
//! - [`StyleConfig`] - Colors used by the SVG wireframe export.
//!
//! # Example
//!
//! ```
//! # use rackline::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.rack().columns_per_row(), 12);
//! assert_eq!(config.rack().row_width(), 19.0 * 72.0);
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use rackline_core::{
    color::Color,
    device::WidthClass,
    metrics::{DeviceMetrics, RACK_UNIT_INCHES, WidthClassMetrics, WidthClassTable},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rack geometry section.
    #[serde(default)]
    rack: RackConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(rack: RackConfig, style: StyleConfig) -> Self {
        Self { rack, style }
    }

    pub fn rack(&self) -> &RackConfig {
        &self.rack
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that the configured values describe a usable rack.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.rack.validate()?;
        self.style.validate()
    }
}

/// Physical rack geometry and scale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    /// Grid columns per row.
    columns_per_row: usize,

    /// Physical row width in inches.
    width_inches: f32,

    /// Rendering scale.
    points_per_inch: f32,

    /// Height of one rack unit in inches.
    unit_height_inches: f32,

    /// Per-class overrides of face width and column span.
    width_classes: IndexMap<WidthClass, WidthClassMetrics>,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            columns_per_row: 12,
            width_inches: 19.0,
            points_per_inch: 72.0,
            unit_height_inches: RACK_UNIT_INCHES,
            width_classes: IndexMap::new(),
        }
    }
}

impl RackConfig {
    /// Overrides the column count (builder style).
    pub fn with_columns_per_row(mut self, columns_per_row: usize) -> Self {
        self.columns_per_row = columns_per_row;
        self
    }

    /// Overrides the rendering scale (builder style).
    pub fn with_points_per_inch(mut self, points_per_inch: f32) -> Self {
        self.points_per_inch = points_per_inch;
        self
    }

    /// Overrides the physical row width (builder style).
    pub fn with_width_inches(mut self, width_inches: f32) -> Self {
        self.width_inches = width_inches;
        self
    }

    /// Overrides the metrics of one width class (builder style).
    pub fn with_width_class(mut self, class: WidthClass, metrics: WidthClassMetrics) -> Self {
        self.width_classes.insert(class, metrics);
        self
    }

    pub fn columns_per_row(&self) -> usize {
        self.columns_per_row
    }

    pub fn width_inches(&self) -> f32 {
        self.width_inches
    }

    pub fn points_per_inch(&self) -> f32 {
        self.points_per_inch
    }

    /// Row width in points.
    pub fn row_width(&self) -> f32 {
        self.width_inches * self.points_per_inch
    }

    /// Builds the device metrics resolver for this rack.
    pub fn metrics(&self) -> DeviceMetrics {
        let table = self
            .width_classes
            .iter()
            .fold(WidthClassTable::default(), |table, (class, metrics)| {
                table.with_class(*class, *metrics)
            });

        DeviceMetrics::new(self.points_per_inch)
            .with_unit_height_inches(self.unit_height_inches)
            .with_table(table)
    }

    fn validate(&self) -> Result<(), String> {
        if self.columns_per_row == 0 {
            return Err("rack.columns_per_row must be at least 1".to_string());
        }

        let positive = [
            ("rack.width_inches", self.width_inches),
            ("rack.points_per_inch", self.points_per_inch),
            ("rack.unit_height_inches", self.unit_height_inches),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(format!("{name} must be a positive number, got {value}"));
        }

        for (class, metrics) in &self.width_classes {
            let face = metrics.face_inches();
            if !face.is_finite() || face <= 0.0 || face > self.width_inches {
                return Err(format!(
                    "rack.width_classes.{class}.face_inches must be in (0, {}], got {face}",
                    self.width_inches
                ));
            }
            if metrics.columns() == Some(0) {
                return Err(format!("rack.width_classes.{class}.columns must be at least 1"));
            }
        }

        check_faces_fit(&self.metrics(), self.width_inches, self.columns_per_row)
    }
}

/// Rejects width classes whose face is wider than the columns they span in a
/// `width_inches` row of `columns_per_row` columns.
pub(crate) fn check_faces_fit(
    metrics: &DeviceMetrics,
    width_inches: f32,
    columns_per_row: usize,
) -> Result<(), String> {
    let row_width = metrics.rack_width(width_inches);
    match metrics.oversized_class(row_width, columns_per_row) {
        Some((class, span)) => Err(format!(
            "rack.width_classes.{class}: face of {}in is wider than its {span} of \
             {columns_per_row} columns ({}in)",
            metrics.table().get(class).face_inches(),
            span as f32 * width_inches / columns_per_row as f32
        )),
        None => Ok(()),
    }
}

/// Colors of the SVG wireframe export, as CSS color strings.
///
/// Unset colors fall back to the renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    face_color: Option<String>,

    #[serde(default)]
    wing_color: Option<String>,

    #[serde(default)]
    rail_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the parsed device face [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn face_color(&self) -> Result<Option<Color>, String> {
        parse_color("face_color", self.face_color.as_deref())
    }

    /// Returns the parsed wing plate [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn wing_color(&self) -> Result<Option<Color>, String> {
        parse_color("wing_color", self.wing_color.as_deref())
    }

    /// Returns the parsed rail [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn rail_color(&self) -> Result<Option<Color>, String> {
        parse_color("rail_color", self.rail_color.as_deref())
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.face_color()?;
        self.wing_color()?;
        self.rail_color()?;
        Ok(())
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}
