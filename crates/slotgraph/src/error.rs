//! Error types for slotgraph operations.
//!
//! This module provides the main error type [`SlotgraphError`] which wraps
//! the error conditions that can occur while turning declaration sources into
//! a rendered diagram.

use std::io;

use thiserror::Error;

use slotgraph_parser::error::ExtractError;

/// The main error type for slotgraph operations.
///
/// # Diagnostic Variants
///
/// The `Extract` variant only occurs in strict mode. It carries every warning
/// of the failing extraction pass together with the source text its spans
/// point into, so callers can render labelled reports.
#[derive(Debug, Error)]
pub enum SlotgraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Extract { err: ExtractError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for SlotgraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl SlotgraphError {
    /// Create a new `Extract` error with the associated source code.
    pub fn new_extract_error(err: ExtractError, src: impl Into<String>) -> Self {
        Self::Extract {
            err,
            src: src.into(),
        }
    }
}
