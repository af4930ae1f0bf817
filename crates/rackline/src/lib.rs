//! Rackline - row layout engine for rack and chassis panels.
//!
//! Parsing of TOML rack descriptions, per-row layout of devices of mixed
//! widths (faces, wing plates and rail seams), and SVG wireframe export.

pub mod config;
pub mod description;
pub mod export;
pub mod layout;

mod error;
mod rack;

pub use rackline_core::{catalog, color, device, grid, identifier, metrics};

pub use error::RacklineError;
pub use rack::Rack;

use log::{debug, info, trace};

use config::AppConfig;
use description::RackDescription;
use export::Exporter;
use layout::{RackLayout, RowLayoutEngine};

/// Builder for parsing, laying out and rendering racks.
///
/// # Examples
///
/// ```rust,no_run
/// use rackline::{RackBuilder, config::AppConfig};
///
/// let source = r#"
/// [[template]]
/// id = "half"
/// width_class = "half"
///
/// [[device]]
/// template = "half"
/// row = 0
/// column = 0
/// "#;
///
/// let builder = RackBuilder::new(AppConfig::default());
/// let mut rack = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&mut rack).expect("Failed to render");
/// ```
#[derive(Default)]
pub struct RackBuilder {
    config: AppConfig,
}

impl RackBuilder {
    /// Create a new rack builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Layout engine for the configured metrics.
    pub fn engine(&self) -> RowLayoutEngine {
        RowLayoutEngine::new(self.config.rack().metrics())
    }

    /// Row width in points for the configured rack.
    pub fn row_width(&self) -> f32 {
        self.config.rack().row_width()
    }

    /// Parse a TOML rack description into a populated [`Rack`].
    ///
    /// # Errors
    ///
    /// Returns [`RacklineError::Config`] for an unusable configuration,
    /// [`RacklineError::Parse`] for malformed TOML, and catalog or placement
    /// errors for descriptions that do not fit together.
    pub fn parse(&self, source: &str) -> Result<Rack, RacklineError> {
        info!("Parsing rack description");
        self.config.validate().map_err(RacklineError::Config)?;

        let description = RackDescription::from_toml(source)?;
        debug!(
            templates = description.template_count(),
            devices = description.device_count();
            "Rack description parsed"
        );
        trace!(description:?; "Parsed description");

        description.into_rack(self.config.rack())
    }

    /// Lay out every row of `rack`.
    pub fn layout<'a>(&self, rack: &'a mut Rack) -> &'a RackLayout {
        let layout = rack.layout(&self.engine(), self.row_width());
        info!(
            rows = layout.rows().len(),
            devices = layout.device_count();
            "Layout calculated"
        );
        layout
    }

    /// Render `rack` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`RacklineError::Export`] for invalid style colors or
    /// rendering failures.
    pub fn render_svg(&self, rack: &mut Rack) -> Result<String, RacklineError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        let layout = self.layout(rack);
        let mut buffer = Vec::new();
        exporter.export_rack_layout(layout, &mut buffer)?;

        let svg = String::from_utf8(buffer).map_err(|err| RacklineError::Export(Box::new(err)))?;
        info!("SVG rendered successfully");
        Ok(svg)
    }
}
