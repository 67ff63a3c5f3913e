//! Command-line argument definitions for the slotgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the two source files, the output path and
//! format, configuration file selection, strictness and logging verbosity.

use clap::Parser;

use slotgraph::Format;

/// Command-line arguments for the slotgraph diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the source file with component declarations
    #[arg(help = "Path to the component declarations file")]
    pub components: String,

    /// Path to the source file with entity classes
    #[arg(help = "Path to the entity classes file")]
    pub entities: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format (svg, html, graph-json)
    #[arg(short, long, default_value = "svg")]
    pub format: Format,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Treat extraction warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
