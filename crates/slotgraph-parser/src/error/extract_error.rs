//! Error wrapping extraction diagnostics when warnings are treated as fatal.

use std::fmt;

use crate::error::Diagnostic;

/// Error carrying every diagnostic produced by one extraction pass.
#[derive(Debug)]
pub struct ExtractError {
    diagnostics: Vec<Diagnostic>,
}

impl ExtractError {
    /// Create a new extract error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ExtractError {}

impl From<Vec<Diagnostic>> for ExtractError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
