//! Export of computed rack layouts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a [`RackLayout`] into an output format. It is the last stage of
//! the pipeline.
//!
//! ```text
//! Rack description (TOML)
//!     ↓ parse
//! Rack (catalog + slot grid)
//!     ↓ layout
//! RackLayout
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG wireframe via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! Export operations return [`Error`], which converts into
//! [`RacklineError::Export`] at the crate boundary.
//!
//! [`RacklineError::Export`]: crate::RacklineError::Export

/// SVG export backend.
pub mod svg;

use std::{fmt, io};

use crate::layout::RackLayout;

/// Abstraction for rack layout export backends.
pub trait Exporter {
    /// Writes `layout` to `out` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be expressed in the
    /// target format, or [`Error::Io`] if writing fails.
    fn export_rack_layout(&self, layout: &RackLayout, out: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors produced while exporting a layout.
#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
