//! `Range` stdlib module — supplements spec.md §6's builtin list; ranges
//! are a first-class value (spec.md §3) but the spec names no dedicated
//! accessor functions for them, so this module is an invented convenience
//! rather than a literal spec requirement (see DESIGN.md).

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

use super::support::tuple_args;

fn expect_range(value: &Value, what: &str) -> Result<vela_values::RangeValue, vela_values::EvalError> {
    match value {
        Value::Range(r) => Ok(*r),
        other => Err(invalid_argument(format!("expected a range for {what}, found {}", other.type_name()))),
    }
}

pub fn to_array(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let range = expect_range(arg, "Range.toArray")?;
    Ok(Value::array(range.iter().map(Value::int).collect()))
}

pub fn contains(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let range = expect_range(&args[0], "Range.contains")?;
    let candidate = super::support::expect_int(&args[1], "Range.contains")?;
    Ok(Value::Bool(range.iter().any(|n| n == candidate)))
}
