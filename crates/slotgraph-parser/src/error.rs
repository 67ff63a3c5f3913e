//! Diagnostic system for slotgraph extraction.
//!
//! Extraction never fails outright: a declaration the scanner cannot make
//! sense of is skipped and reported as a warning [`Diagnostic`] with an
//! optional [`WarningCode`], labeled source spans, and help text. Callers
//! that want malformed input to be fatal wrap the diagnostics in an
//! [`ExtractError`].
//!
//! # Example
//!
//! ```
//! # use slotgraph_parser::error::{Diagnostic, WarningCode};
//! # use slotgraph_parser::Span;
//!
//! let diag = Diagnostic::warning("component `Parent` is declared more than once")
//!     .with_code(WarningCode::W002)
//!     .with_label(Span::new(100..140), "redeclared here")
//!     .with_secondary_label(Span::new(10..50), "first declared here")
//!     .with_help("the last declaration wins");
//! ```

mod collector;
mod diagnostic;
mod extract_error;
mod label;
mod warning_code;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use extract_error::ExtractError;
pub use label::Label;
pub use warning_code::WarningCode;
