//! The core diagnostic type.

use std::fmt;

use crate::{
    error::{label::Label, warning_code::WarningCode},
    span::Span,
};

/// A warning about source text the extractors skipped or resolved by
/// overwriting.
///
/// ```text
/// warning[W001]: component declaration `Parent` is missing its `;` terminator
///   --> components.ts:3:1
///    |
///  3 | export const Parent = defineComponent(EntityId
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ declaration starts here
///    |
///    = help: end the declaration with `;`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<WarningCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the warning code, if any.
    pub fn code(&self) -> Option<WarningCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the warning code.
    pub fn with_code(mut self, code: WarningCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
