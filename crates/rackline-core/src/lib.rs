//! Rackline Core Types
//!
//! This crate provides the foundational types shared by the Rackline layout
//! engine and its collaborators:
//!
//! - **Identifiers**: interned device and template ids ([`identifier::Id`])
//! - **Devices**: width classes, templates and placed handles ([`device`] module)
//! - **Metrics**: width-class to point conversion ([`metrics::DeviceMetrics`])
//! - **Catalog**: template registry and resolution ([`catalog`] module)
//! - **Grid**: the rows × columns placement grid ([`grid::SlotGrid`])
//! - **Colors**: CSS color handling for rendered output ([`color::Color`])

pub mod catalog;
pub mod color;
pub mod device;
pub mod grid;
pub mod identifier;
pub mod metrics;
