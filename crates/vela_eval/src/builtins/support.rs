//! Shared argument-extraction and result-construction helpers for the
//! native builtin modules (spec.md §6's "result tuple convention").

use vela_values::{invalid_argument, EvalError, NativeContext, Value};

pub fn tuple_args(value: &Value, arity: usize) -> Result<Vec<Value>, EvalError> {
    let Value::Tuple(items) = value else {
        return Err(invalid_argument(format!("expected a {arity}-tuple of arguments")));
    };
    if items.len() != arity {
        return Err(invalid_argument(format!(
            "expected {arity} argument(s), got {}",
            items.len()
        )));
    }
    Ok(items.iter().cloned().collect())
}

pub fn expect_str(value: &Value, what: &str) -> Result<std::rc::Rc<str>, EvalError> {
    match value {
        Value::Str(s) => Ok(std::rc::Rc::from(s.as_str())),
        other => Err(invalid_argument(format!("expected a string for {what}, found {}", other.type_name()))),
    }
}

pub fn expect_int(value: &Value, what: &str) -> Result<i64, EvalError> {
    match value {
        Value::Int(i) => Ok(i.raw()),
        other => Err(invalid_argument(format!("expected an int for {what}, found {}", other.type_name()))),
    }
}

pub fn expect_array(value: &Value, what: &str) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::Array(items) => Ok(items.iter().cloned().collect()),
        other => Err(invalid_argument(format!("expected an array for {what}, found {}", other.type_name()))),
    }
}

/// `(#ok, value)`.
pub fn ok(ctx: &dyn NativeContext, value: Value) -> Value {
    Value::tuple(vec![Value::Symbol(ctx.intern("ok")), value])
}

/// `(#error, message)`.
pub fn err(ctx: &dyn NativeContext, message: impl Into<String>) -> Value {
    Value::tuple(vec![Value::Symbol(ctx.intern("error")), Value::string(message.into())])
}

/// A bare sentinel symbol, e.g. `#outOfBounds`.
pub fn sentinel(ctx: &dyn NativeContext, name: &str) -> Value {
    Value::Symbol(ctx.intern(name))
}
