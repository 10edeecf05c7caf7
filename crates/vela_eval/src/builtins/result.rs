//! `Result` stdlib module — convenience helpers over the `(#ok, value)` /
//! `(#error, message)` result-tuple convention (spec.md §6). Supplements
//! the literal builtin list; see DESIGN.md.

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

use super::support::tuple_args;

fn tag(value: &Value) -> Result<(vela_ir::Name, Value), vela_values::EvalError> {
    let pair = tuple_args(value, 2)?;
    match &pair[0] {
        Value::Symbol(name) => Ok((*name, pair[1].clone())),
        other => Err(invalid_argument(format!(
            "expected a result tuple tagged with a symbol, found {}",
            other.type_name()
        ))),
    }
}

pub fn is_ok(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let (tag_name, _) = tag(arg)?;
    Ok(Value::Bool(tag_name == ctx.intern("ok")))
}

pub fn is_error(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let (tag_name, _) = tag(arg)?;
    Ok(Value::Bool(tag_name == ctx.intern("error")))
}

pub fn map(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let (tag_name, payload) = tag(&args[0])?;
    if tag_name == ctx.intern("ok") {
        let mapped = ctx.apply(args[1].clone(), payload)?;
        Ok(Value::tuple(vec![Value::Symbol(tag_name), mapped]))
    } else {
        Ok(args[0].clone())
    }
}

pub fn unwrap_or(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let (tag_name, payload) = tag(&args[0])?;
    if tag_name == ctx.intern("ok") {
        Ok(payload)
    } else {
        Ok(args[1].clone())
    }
}
