//! Rich diagnostics: a code, a primary span, an optional secondary span,
//! and an optional suggestion. This is the driver-facing rendering of an
//! [`crate::ErrorCode`] plus whatever the evaluator's error context (§4.8)
//! attached at the failure site.

use std::fmt;

use vela_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span with a message, attached to a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// One stack frame captured for the trace attached to an error (§4.8).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StackFrameInfo {
    pub function_name: Option<String>,
    pub filename: String,
    pub span: Span,
    pub is_native: bool,
}

/// A rich diagnostic: code, explanatory text, one or more labeled spans,
/// an optional suggestion, and a call-stack trace.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub suggestion: Option<String>,
    pub filename: String,
    pub stack: Vec<StackFrameInfo>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>, filename: impl Into<String>) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: message.into(),
            labels: Vec::new(),
            suggestion: None,
            filename: filename.into(),
            stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_primary(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: Vec<StackFrameInfo>) -> Self {
        self.stack = stack;
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }
}
