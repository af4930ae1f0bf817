//! Error types for Rackline operations.
//!
//! [`RacklineError`] wraps everything that can go wrong between reading a
//! rack description and writing its rendered layout.

use std::io;

use thiserror::Error;

use rackline_core::{catalog::CatalogError, grid::GridError};

/// The main error type for Rackline operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the TOML source next to the error so callers can
/// point at the offending span.
#[derive(Debug, Error)]
pub enum RacklineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Placement error: {0}")]
    Grid(#[from] GridError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for RacklineError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl RacklineError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
