//! Command-line argument definitions for the Rackline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and the optional text report.

use clap::Parser;

/// Command-line arguments for the Rackline layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input rack description (TOML)
    #[arg(help = "Path to the input rack description")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print one line per laid-out device to stdout
    #[arg(long)]
    pub report: bool,
}
