//! Parse-time errors.
//!
//! Only three shapes, matching the E1xxx band `vela_diagnostic` reserves
//! for this crate (spec.md §7). Each carries the single span the
//! terminal emitter needs to draw its caret; richer multi-label
//! diagnostics are an evaluator-side concern (`vela_values::EvalError`),
//! not a parser one.

use std::fmt;

use vela_diagnostic::{Diagnostic, ErrorCode};
use vela_ir::Span;

#[derive(Clone, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn unexpected_token(message: impl Into<String>, span: Span) -> Self {
        ParseError { code: ErrorCode::E1001, message: message.into(), span }
    }

    pub fn expected_expression(span: Span) -> Self {
        ParseError {
            code: ErrorCode::E1002,
            message: "expected an expression".to_string(),
            span,
        }
    }

    pub fn unterminated_string(span: Span) -> Self {
        ParseError {
            code: ErrorCode::E1003,
            message: "unterminated string literal".to_string(),
            span,
        }
    }

    /// Renders this error as a driver-facing `Diagnostic`, ready for
    /// `vela_diagnostic::emitter::terminal::TerminalEmitter`.
    pub fn to_diagnostic(&self, filename: impl Into<String>) -> Diagnostic {
        Diagnostic::error(self.code, self.message.clone(), filename).with_primary(self.span, self.message.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}..{}): {}", self.code, self.span.start, self.span.end, self.message)
    }
}

impl std::error::Error for ParseError {}
