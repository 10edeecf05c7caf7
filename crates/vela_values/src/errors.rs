//! Evaluation errors: the typed error data of spec.md §7, carried
//! alongside an optional primary span and (for cyclic references only) a
//! secondary span.

use vela_ir::Span;

use crate::Value;

pub type EvalResult = Result<Value, EvalError>;

/// One of spec.md §7's error kinds, with its typed payload.
#[derive(Clone, Debug)]
pub enum ErrorKind {
    UnknownIdentifier { name: String },
    UnknownField { field: String, available: Vec<String> },
    TypeMismatch {
        expected: String,
        found: String,
        operation: Option<String>,
    },
    ExpectedFunction { found: String },
    WrongNumberOfArguments { expected: usize, got: usize },
    InvalidArgument { message: String },
    ModuleNotFound { path: String },
    Overflow { operation: String },
    DivisionByZero,
    IndexOutOfBounds { index: i64, len: usize },
    FieldNotFound { field: String },
    CyclicReference,
    UserCrash { message: String },
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownIdentifier { .. } => "unknown_identifier",
            ErrorKind::UnknownField { .. } => "unknown_field",
            ErrorKind::TypeMismatch { .. } => "type_mismatch",
            ErrorKind::ExpectedFunction { .. } => "expected_function",
            ErrorKind::WrongNumberOfArguments { .. } => "wrong_number_of_arguments",
            ErrorKind::InvalidArgument { .. } => "invalid_argument",
            ErrorKind::ModuleNotFound { .. } => "module_not_found",
            ErrorKind::Overflow { .. } => "overflow",
            ErrorKind::DivisionByZero => "division_by_zero",
            ErrorKind::IndexOutOfBounds { .. } => "index_out_of_bounds",
            ErrorKind::FieldNotFound { .. } => "field_not_found",
            ErrorKind::CyclicReference => "cyclic_reference",
            ErrorKind::UserCrash { .. } => "user_crash",
        }
    }
}

/// One frame of the call-stack trace captured at the innermost error site
/// that doesn't already have one (spec.md §4.8).
#[derive(Clone, Debug)]
pub struct StackFrame {
    pub function_name: Option<String>,
    pub filename: String,
    pub span: Span,
    pub is_native: bool,
}

/// A secondary, labeled span — used only by `cyclic_reference` to point at
/// both the field's defining key and the first reference found inside it.
#[derive(Clone, Debug)]
pub struct SecondarySpan {
    pub span: Span,
    pub label: &'static str,
}

#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<Span>,
    pub secondary: Option<SecondarySpan>,
    pub call_stack: Option<Vec<StackFrame>>,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            span: None,
            secondary: None,
            call_stack: None,
        }
    }

    /// Attaches a span only if none is set yet — callers "prefer the most
    /// specific site" (spec.md §7) by calling `with_span` at each
    /// propagation level and letting the innermost one win.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Force-overwrites the span even if one was already set — used at the
    /// exact failure site before any propagation has happened.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, span: Span, label: &'static str) -> Self {
        self.secondary = Some(SecondarySpan { span, label });
        self
    }

    #[must_use]
    pub fn with_call_stack(mut self, stack: Vec<StackFrame>) -> Self {
        if self.call_stack.is_none() {
            self.call_stack = Some(stack);
        }
        self
    }

    pub fn has_call_stack(&self) -> bool {
        self.call_stack.is_some()
    }
}

// --- constructors for spec.md §7's error kinds --------------------------

#[cold]
pub fn unknown_identifier(name: impl Into<String>) -> EvalError {
    let name = name.into();
    EvalError::new(
        ErrorKind::UnknownIdentifier { name: name.clone() },
        format!("unknown identifier `{name}`"),
    )
}

#[cold]
pub fn unknown_field(field: impl Into<String>, available: Vec<String>) -> EvalError {
    let field = field.into();
    EvalError::new(
        ErrorKind::UnknownField {
            field: field.clone(),
            available,
        },
        format!("unknown field `{field}`"),
    )
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>, operation: Option<&str>) -> EvalError {
    let expected = expected.into();
    let found = found.into();
    let message = match operation {
        Some(op) => format!("expected {expected}, found {found} (in {op})"),
        None => format!("expected {expected}, found {found}"),
    };
    EvalError::new(
        ErrorKind::TypeMismatch {
            expected,
            found,
            operation: operation.map(str::to_string),
        },
        message,
    )
}

#[cold]
pub fn expected_function(found: impl Into<String>) -> EvalError {
    let found = found.into();
    EvalError::new(
        ErrorKind::ExpectedFunction { found: found.clone() },
        format!("expected a function, found {found}"),
    )
}

#[cold]
pub fn wrong_number_of_arguments(expected: usize, got: usize) -> EvalError {
    EvalError::new(
        ErrorKind::WrongNumberOfArguments { expected, got },
        format!("expected {expected} argument(s), got {got}"),
    )
}

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    let message = message.into();
    EvalError::new(ErrorKind::InvalidArgument { message: message.clone() }, message)
}

#[cold]
pub fn module_not_found(path: impl Into<String>) -> EvalError {
    let path = path.into();
    EvalError::new(
        ErrorKind::ModuleNotFound { path: path.clone() },
        format!("module not found: `{path}`"),
    )
}

#[cold]
pub fn overflow(operation: impl Into<String>) -> EvalError {
    let operation = operation.into();
    EvalError::new(
        ErrorKind::Overflow { operation: operation.clone() },
        format!("integer overflow in {operation}"),
    )
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(ErrorKind::DivisionByZero, "division by zero")
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(
        ErrorKind::IndexOutOfBounds { index, len },
        format!("index {index} out of bounds (length {len})"),
    )
}

#[cold]
pub fn field_not_found(field: impl Into<String>) -> EvalError {
    let field = field.into();
    EvalError::new(
        ErrorKind::FieldNotFound { field: field.clone() },
        format!("no field named `{field}`"),
    )
}

#[cold]
pub fn cyclic_reference() -> EvalError {
    EvalError::new(ErrorKind::CyclicReference, "cyclic reference detected")
}

#[cold]
pub fn user_crash(message: impl Into<String>) -> EvalError {
    let message = message.into();
    EvalError::new(ErrorKind::UserCrash { message: message.clone() }, message)
}
