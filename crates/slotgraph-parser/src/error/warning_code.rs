//! Warning codes for extraction diagnostics.
//!
//! Codes are organized by extractor:
//! - `W0xx` - Component declarations
//! - `W1xx` - Entity classes

use std::fmt;

/// Codes for categorizing extraction warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// Unterminated component declaration.
    ///
    /// A declaration head was found but no `;` follows it, so the
    /// declaration body cannot be delimited.
    W001,

    /// Duplicate component declaration.
    ///
    /// The same component name is declared more than once; the last
    /// declaration wins.
    W002,

    /// Unbalanced entity class body.
    ///
    /// A class opened with `{` never reaches its matching `}`.
    W101,

    /// Duplicate entity class.
    ///
    /// The same class name is declared more than once; the last
    /// declaration wins.
    W102,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::W001 => "W001",
            Self::W002 => "W002",
            Self::W101 => "W101",
            Self::W102 => "W102",
        };
        write!(f, "{code}")
    }
}
