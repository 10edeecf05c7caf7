//! `Tuple` stdlib module — supplements spec.md §6's builtin list with
//! positional accessors for the tuple value kind (spec.md §3); see
//! DESIGN.md.

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

fn expect_tuple(value: &Value, what: &str) -> Result<Vec<Value>, vela_values::EvalError> {
    match value {
        Value::Tuple(items) => Ok(items.iter().cloned().collect()),
        other => Err(invalid_argument(format!("expected a tuple for {what}, found {}", other.type_name()))),
    }
}

pub fn first(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let items = expect_tuple(arg, "Tuple.first")?;
    items
        .into_iter()
        .next()
        .ok_or_else(|| invalid_argument("Tuple.first called on an empty tuple"))
}

pub fn second(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let items = expect_tuple(arg, "Tuple.second")?;
    items
        .into_iter()
        .nth(1)
        .ok_or_else(|| invalid_argument("Tuple.second called on a tuple with fewer than 2 elements"))
}

pub fn to_array(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let items = expect_tuple(arg, "Tuple.toArray")?;
    Ok(Value::array(items))
}
