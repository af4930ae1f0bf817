//! CLI logic for the Rackline layout tool.
//!
//! This module contains the core CLI logic: load configuration, parse the
//! rack description, lay it out, and write the SVG wireframe.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::Args;

use std::fs;

use log::info;

use rackline::{RackBuilder, RacklineError};

/// Run the Rackline CLI application
///
/// This function processes the input file through the Rackline pipeline
/// and writes the resulting SVG to the output file. With `--report`, a text
/// summary of every laid-out device is printed to stdout.
///
/// # Errors
///
/// Returns `RacklineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Catalog and placement errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), RacklineError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing rack"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = RackBuilder::new(app_config);
    let mut rack = builder.parse(&source)?;
    let svg = builder.render_svg(&mut rack)?;

    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if args.report {
        print!("{}", report::format_report(builder.layout(&mut rack)));
    }

    Ok(())
}
