//! `Symbol` stdlib module — supplements spec.md §6's builtin list; see
//! DESIGN.md.

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

pub fn to_string_(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    match arg {
        Value::Symbol(name) => Ok(Value::string(ctx.resolve(*name))),
        other => Err(invalid_argument(format!("expected a symbol for Symbol.toString, found {}", other.type_name()))),
    }
}
