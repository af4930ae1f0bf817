//! SVG wireframe of a computed rack.
//!
//! Each device is drawn as up to five rectangles, left to right: left rail,
//! left wing, face, right wing, right rail. Zero-width parts are skipped.
//! Rows are outlined so empty rack units stay visible.

use std::io;

use log::{debug, info};
use svg::{Document, node::Text as SvgText, node::element as svg_element};

use rackline_core::color::Color;

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    layout::{RackLayout, RowLayout, SlotLayout},
};

/// Blank space around the rack, in points.
const MARGIN: f32 = 20.0;

/// Largest label font size, in points.
const MAX_FONT_SIZE: f32 = 12.0;

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the style and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            background_color: resolve_color(style.background_color(), "white")?,
            face_color: resolve_color(style.face_color(), "#3a3a3a")?,
            wing_color: resolve_color(style.wing_color(), "#9a9a9a")?,
            rail_color: resolve_color(style.rail_color(), "#e0e0e0")?,
        })
    }
}

fn resolve_color(
    configured: Result<Option<Color>, String>,
    fallback: &str,
) -> Result<Color, export::Error> {
    match configured.map_err(export::Error::Render)? {
        Some(color) => Ok(color),
        None => Color::new(fallback).map_err(export::Error::Render),
    }
}

/// SVG exporter.
#[derive(Debug, Clone)]
pub struct Svg {
    background_color: Color,
    face_color: Color,
    wing_color: Color,
    rail_color: Color,
}

impl Svg {
    /// Renders the whole rack into an SVG document.
    pub fn render_rack_layout(&self, layout: &RackLayout) -> Document {
        let width = MARGIN.mul_add(2.0, layout.row_width());
        let height = MARGIN.mul_add(2.0, layout.height());
        debug!(width, height; "SVG dimensions");

        let background = svg_element::Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", width)
            .set("height", height)
            .set("fill", self.background_color.to_string())
            .set("fill-opacity", self.background_color.alpha());

        let mut rack = svg_element::Group::new()
            .set("id", "rack")
            .set("transform", format!("translate({MARGIN}, {MARGIN})"));
        for row in layout.rows() {
            rack = rack.add(self.render_row(row, layout.row_width()));
        }

        Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(background)
            .add(rack)
    }

    fn render_row(&self, row: &RowLayout, row_width: f32) -> svg_element::Group {
        let outline = svg_element::Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", row_width)
            .set("height", row.height())
            .set("fill", "none")
            .set("stroke", self.rail_color.to_string())
            .set("stroke-dasharray", "4 2");

        let mut group = svg_element::Group::new()
            .set("class", "row")
            .set("data-row", row.index().to_string())
            .set("transform", format!("translate(0, {})", row.y_offset()))
            .add(outline);

        for slot in row.slots() {
            group = group.add(self.render_slot(slot));
        }
        group
    }

    fn render_slot(&self, slot: &SlotLayout) -> svg_element::Group {
        let height = slot.height();
        let parts = [
            ("rail", slot.x_offset(), slot.left_rail(), &self.rail_color),
            ("wing", slot.left_wing_x(), slot.left_wing(), &self.wing_color),
            ("face", slot.face_x(), slot.face_width(), &self.face_color),
            ("wing", slot.right_wing_x(), slot.right_wing(), &self.wing_color),
            (
                "rail",
                slot.right_wing_x() + slot.right_wing(),
                slot.right_rail(),
                &self.rail_color,
            ),
        ];

        let mut group = svg_element::Group::new()
            .set("class", "device")
            .set("data-device", slot.device().id().to_string());

        for (class, x, width, color) in parts {
            if width <= 0.0 {
                continue;
            }
            group = group.add(
                svg_element::Rectangle::new()
                    .set("class", class)
                    .set("x", x)
                    .set("y", 0.0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha())
                    .set("stroke", "black")
                    .set("stroke-width", 0.5),
            );
        }

        let font_size = (height * 0.4).min(MAX_FONT_SIZE);
        let label = svg_element::Text::new("")
            .set("x", slot.face_x() + slot.face_width() / 2.0)
            .set("y", height / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", font_size)
            .set("fill", "white")
            .add(SvgText::new(slot.device().id().to_string()));

        group.add(label)
    }
}

impl Exporter for Svg {
    fn export_rack_layout(
        &self,
        layout: &RackLayout,
        out: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render_rack_layout(layout);
        debug!("SVG document rendered");

        write!(out, "{doc}")?;
        info!(devices = layout.device_count(); "SVG written");
        Ok(())
    }
}
