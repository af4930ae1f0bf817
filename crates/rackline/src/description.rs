//! TOML rack descriptions.
//!
//! A description lists device templates and where instances of them sit in
//! the grid:
//!
//! ```toml
//! [rack]
//! rows = 4
//!
//! [[template]]
//! id = "comp-half"
//! width_class = "half"
//!
//! [[device]]
//! id = "comp-1"
//! template = "comp-half"
//! row = 0
//! column = 0
//! ```
//!
//! `[rack]` may also override `columns_per_row`. When `rows` is omitted the
//! grid is just tall enough for every device. Devices without an `id` get
//! one derived from their template.

use log::info;
use serde::Deserialize;

use rackline_core::{
    catalog::{DeviceCatalog, TemplateResolver},
    device::DeviceTemplate,
    grid::SlotGrid,
    identifier::Id,
};

use crate::{
    RacklineError,
    config::{RackConfig, check_faces_fit},
    rack::Rack,
};

/// Parsed, not yet validated, rack description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RackDescription {
    #[serde(default)]
    rack: RackSection,

    #[serde(default, rename = "template")]
    templates: Vec<TemplateEntry>,

    #[serde(default, rename = "device")]
    devices: Vec<DeviceEntry>,
}

/// `[rack]` overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RackSection {
    rows: Option<usize>,
    columns_per_row: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateEntry {
    id: Id,
    #[serde(flatten)]
    template: DeviceTemplate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceEntry {
    id: Option<Id>,
    template: Id,
    row: usize,
    column: usize,
}

impl RackDescription {
    /// Parses a description from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`RacklineError::Parse`] with the source attached.
    pub fn from_toml(source: &str) -> Result<Self, RacklineError> {
        toml::from_str(source).map_err(|err| RacklineError::new_parse_error(err, source))
    }

    /// Number of listed templates.
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Number of listed device placements.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Builds the catalog and populates the grid.
    ///
    /// The configured column count applies unless the description overrides
    /// it; spans come from the configured width classes.
    ///
    /// # Errors
    ///
    /// Returns [`RacklineError::Catalog`] for duplicate or unknown templates,
    /// [`RacklineError::Grid`] for placements that do not fit, and
    /// [`RacklineError::Config`] for a zero column count or a width class
    /// wider than the columns it spans.
    pub fn into_rack(self, rack_config: &RackConfig) -> Result<Rack, RacklineError> {
        let columns = self
            .rack
            .columns_per_row
            .unwrap_or(rack_config.columns_per_row());
        if columns == 0 {
            return Err(RacklineError::Config(
                "rack.columns_per_row must be at least 1".to_string(),
            ));
        }

        let metrics = rack_config.metrics();
        check_faces_fit(&metrics, rack_config.width_inches(), columns)
            .map_err(RacklineError::Config)?;

        let mut catalog = DeviceCatalog::new();
        for entry in self.templates {
            catalog.register(entry.id, entry.template)?;
        }

        let devices = self
            .devices
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<_, RacklineError> {
                let id = entry
                    .id
                    .unwrap_or_else(|| Id::numbered(&entry.template.to_string(), index));
                Ok((catalog.instantiate(id, entry.template)?, entry))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let needed_rows = devices
            .iter()
            .map(|(device, entry)| entry.row + usize::from(device.unit_height()))
            .max()
            .unwrap_or(0);
        let rows = self.rack.rows.unwrap_or(needed_rows.max(1));

        let mut grid = SlotGrid::new(rows, columns);
        for (device, entry) in devices {
            let span = metrics.column_span(device.width_class(), columns);
            grid.place(device, entry.row, entry.column, span)?;
        }

        info!(rows, columns, templates = catalog.len(); "Rack populated");
        Ok(Rack::new(catalog, grid))
    }
}
