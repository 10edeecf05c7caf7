//! Type-predicate builtins, bound unqualified through `Basics` (spec.md §6).

use vela_values::{EvalResult, NativeContext, Value};

pub fn is_int(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Int(_))))
}

pub fn is_float(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Float(_))))
}

pub fn is_bool(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Bool(_))))
}

pub fn is_null(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Null)))
}

pub fn is_string(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Str(_))))
}

pub fn is_array(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Array(_))))
}

pub fn is_object(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Object(_))))
}

pub fn is_function(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Function(_) | Value::Native(..) | Value::Partial(_))))
}

pub fn is_symbol(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Bool(matches!(arg, Value::Symbol(_))))
}

pub fn type_of(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::string(arg.type_name()))
}
