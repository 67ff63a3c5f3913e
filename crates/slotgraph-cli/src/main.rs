//! slotgraph CLI entry point.

use std::process;

use clap::Parser;
use log::{debug, error, info};

use slotgraph_cli::{Args, FALLBACK_LOG_LEVEL, error_adapter::render_reports, parse_log_level};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = slotgraph_cli::run(&args) {
        for report in render_reports(&err) {
            error!("{report}");
        }
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Starts `env_logger` at the requested level; `RUST_LOG` still refines
/// per-module filters.
fn init_logging(raw_level: &str) {
    let log_level = parse_log_level(raw_level).unwrap_or_else(|| {
        eprintln!("Invalid log level: {raw_level}. Using '{FALLBACK_LOG_LEVEL}' instead.");
        FALLBACK_LOG_LEVEL
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting slotgraph");
}
