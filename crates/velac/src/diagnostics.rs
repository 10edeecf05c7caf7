//! Renders an evaluator [`EvalError`] as a driver-facing [`Diagnostic`].
//!
//! Mirrors `vela_parse::ParseError::to_diagnostic`'s shape, extended with
//! the evaluator's secondary span and call-stack slots.

use vela_diagnostic::{Diagnostic, ErrorCode, StackFrameInfo};
use vela_values::{ErrorKind, EvalError};

fn error_code(kind: &ErrorKind) -> ErrorCode {
    match kind {
        ErrorKind::UnknownIdentifier { .. } => ErrorCode::E6001,
        ErrorKind::UnknownField { .. } => ErrorCode::E6002,
        ErrorKind::TypeMismatch { .. } => ErrorCode::E6003,
        ErrorKind::ExpectedFunction { .. } => ErrorCode::E6004,
        ErrorKind::WrongNumberOfArguments { .. } => ErrorCode::E6005,
        ErrorKind::InvalidArgument { .. } => ErrorCode::E6006,
        ErrorKind::ModuleNotFound { .. } => ErrorCode::E6007,
        ErrorKind::Overflow { .. } => ErrorCode::E6008,
        ErrorKind::DivisionByZero => ErrorCode::E6009,
        ErrorKind::IndexOutOfBounds { .. } => ErrorCode::E6010,
        ErrorKind::FieldNotFound { .. } => ErrorCode::E6011,
        ErrorKind::CyclicReference => ErrorCode::E6012,
        ErrorKind::UserCrash { .. } => ErrorCode::E6013,
    }
}

pub fn to_diagnostic(err: &EvalError, filename: &str) -> Diagnostic {
    let code = error_code(&err.kind);
    let mut diagnostic = Diagnostic::error(code, err.message.clone(), filename.to_string());

    if let Some(span) = err.span {
        diagnostic = diagnostic.with_primary(span, err.message.clone());
    }
    if let Some(secondary) = &err.secondary {
        diagnostic = diagnostic.with_secondary(secondary.span, secondary.label);
    }
    if let Some(stack) = &err.call_stack {
        let frames = stack
            .iter()
            .map(|frame| StackFrameInfo {
                function_name: frame.function_name.clone(),
                filename: frame.filename.clone(),
                span: frame.span,
                is_native: frame.is_native,
            })
            .collect();
        diagnostic = diagnostic.with_stack(frames);
    }

    diagnostic
}
