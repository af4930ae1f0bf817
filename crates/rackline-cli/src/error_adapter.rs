//! Error adapter for converting RacklineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. TOML errors carry
//! a byte span into their source, which is rendered as a labelled snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use rackline::RacklineError;

/// Adapter for a TOML syntax or schema error.
pub struct TomlDiagnostic<'a> {
    err: &'a toml::de::Error,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> TomlDiagnostic<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for TomlDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TomlDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for TomlDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for TomlDiagnostic<'_> {}

impl MietteDiagnostic for TomlDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("rackline::parse"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`RacklineError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a RacklineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RacklineError::Io(_) => "rackline::io",
            RacklineError::Parse { .. } => "rackline::parse",
            RacklineError::Catalog(_) => "rackline::catalog",
            RacklineError::Grid(_) => "rackline::placement",
            RacklineError::Config(_) => "rackline::config",
            RacklineError::Export(_) => "rackline::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            RacklineError::Catalog(_) => "every [[device]] must name a [[template]] id",
            RacklineError::Grid(_) => {
                "devices must lie inside the grid and must not overlap; \
                 check row, column and unit_height"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A TOML error with source location information.
    Diagnostic(TomlDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`RacklineError`] into a list of reportable errors.
pub fn to_reportables(err: &RacklineError) -> Vec<Reportable<'_>> {
    match err {
        RacklineError::Parse { err, src } => {
            vec![Reportable::Diagnostic(TomlDiagnostic::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
