//! CLI logic for the slotgraph diagram tool.
//!
//! This module contains the core CLI logic for the slotgraph diagram tool.

pub mod config;
pub mod error_adapter;

mod args;

pub use args::Args;

use std::fs;

use log::{LevelFilter, info, warn};

use slotgraph::{DiagramBuilder, Diagnostic, SlotgraphError};

/// Level used when `--log-level` cannot be parsed.
pub const FALLBACK_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parses a `--log-level` value such as `debug` or `OFF`.
///
/// Returns `None` for anything that is not a [`LevelFilter`] name.
pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

/// Run the slotgraph CLI application
///
/// This function processes both source files through the slotgraph pipeline
/// and writes the resulting artifact to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SlotgraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Extraction warnings in strict mode
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), SlotgraphError> {
    info!(
        components_path = args.components,
        entities_path = args.entities,
        output_path = args.output,
        format:% = args.format;
        "Processing sources"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let components_source = fs::read_to_string(&args.components)?;
    let entities_source = fs::read_to_string(&args.entities)?;

    let builder = DiagramBuilder::new(app_config).with_strict(args.strict);
    let pipeline = builder.build(&components_source, &entities_source)?;

    report_warnings(&args.components, pipeline.component_diagnostics());
    report_warnings(&args.entities, pipeline.entity_diagnostics());

    let artifact = builder.export(&pipeline, args.format)?;

    fs::write(&args.output, artifact)?;

    info!(output_file = args.output; "Diagram written successfully");

    Ok(())
}

fn report_warnings(path: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let offset = diagnostic
            .labels()
            .first()
            .map(|label| label.span().start());
        warn!(path = path, offset:? = offset; "{diagnostic}");
    }
}
