//! `Object` stdlib module (spec.md §6).
//!
//! Object fields are lazily thunked (spec.md §4.2), so every builtin here
//! that reads a field's value must force it through `ctx.force` rather than
//! handing the raw `ValueField.value` to the caller.

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

use super::support::{expect_str, ok, sentinel, tuple_args};

fn expect_object(value: &Value, what: &str) -> Result<vela_values::Heap<vela_values::ObjectValue>, vela_values::EvalError> {
    match value {
        Value::Object(obj) => Ok(obj.clone()),
        other => Err(invalid_argument(format!("expected an object for {what}, found {}", other.type_name()))),
    }
}

pub fn keys(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let obj = expect_object(arg, "Object.keys")?;
    Ok(Value::array(obj.fields.iter().map(|f| Value::string(f.name.to_string())).collect()))
}

pub fn values(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let obj = expect_object(arg, "Object.values")?;
    let mut out = Vec::with_capacity(obj.fields.len());
    for field in &obj.fields {
        out.push(ctx.force(field.value.clone())?);
    }
    Ok(Value::array(out))
}

pub fn entries(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let obj = expect_object(arg, "Object.entries")?;
    let mut out = Vec::with_capacity(obj.fields.len());
    for field in &obj.fields {
        let forced = ctx.force(field.value.clone())?;
        out.push(Value::tuple(vec![Value::string(field.name.to_string()), forced]));
    }
    Ok(Value::array(out))
}

pub fn get(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let obj = expect_object(&args[0], "Object.get")?;
    let key = expect_str(&args[1], "Object.get")?;
    match obj.get(&key) {
        Some(field) => Ok(ok(ctx, ctx.force(field.value.clone())?)),
        None => Ok(sentinel(ctx, "notFound")),
    }
}

pub fn has(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let obj = expect_object(&args[0], "Object.has")?;
    let key = expect_str(&args[1], "Object.has")?;
    Ok(Value::Bool(obj.get(&key).is_some()))
}

pub fn length(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let obj = expect_object(arg, "Object.length")?;
    Ok(Value::int(obj.fields.len() as i64))
}

pub fn from_entries(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let entries = super::support::expect_array(arg, "Object.fromEntries")?;
    let mut fields = Vec::with_capacity(entries.len());
    for entry in entries {
        let pair = tuple_args(&entry, 2)?;
        let key = expect_str(&pair[0], "Object.fromEntries")?;
        let value = ctx.force(pair[1].clone())?;
        fields.push(vela_values::ValueField { name: key, value, is_patch: false });
    }
    Ok(Value::object(vela_values::ObjectValue { fields, doc: None }))
}
