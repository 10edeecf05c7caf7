//! `Json.parse` / `Json.encode` (spec.md §6).

use vela_values::{invalid_argument, EvalResult, NativeContext, ObjectValue, Value, ValueField};

use super::support::{err, expect_str, ok};

pub fn parse(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let text = expect_str(arg, "Json.parse")?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(parsed) => Ok(ok(ctx, from_json(parsed, ctx))),
        Err(e) => Ok(err(ctx, e.to_string())),
    }
}

pub fn encode(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let json = to_json(arg.clone(), ctx)?;
    let text = serde_json::to_string(&json).map_err(|e| invalid_argument(e.to_string()))?;
    Ok(Value::string(text))
}

fn from_json(value: serde_json::Value, ctx: &dyn NativeContext) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => {
            Value::array(items.into_iter().map(|v| from_json(v, ctx)).collect())
        }
        serde_json::Value::Object(map) => {
            let fields = map
                .into_iter()
                .map(|(name, v)| ValueField { name: name.into(), value: from_json(v, ctx), is_patch: false })
                .collect();
            Value::object(ObjectValue { fields, doc: None })
        }
    }
}

fn to_json(value: Value, ctx: &dyn NativeContext) -> Result<serde_json::Value, vela_values::EvalError> {
    let forced = ctx.force(value)?;
    Ok(match forced {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Int(i) => serde_json::Value::from(i.raw()),
        Value::Float(f) => serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::Symbol(_) => return Err(invalid_argument("Json.encode cannot encode a symbol")),
        Value::Array(items) | Value::Tuple(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(to_json(item.clone(), ctx)?);
            }
            serde_json::Value::Array(out)
        }
        Value::Object(obj) => {
            let mut map = serde_json::Map::new();
            for field in &obj.fields {
                map.insert(field.name.to_string(), to_json(field.value.clone(), ctx)?);
            }
            serde_json::Value::Object(map)
        }
        Value::Range(_) => return Err(invalid_argument("Json.encode cannot encode a range")),
        Value::Function(_) | Value::Native(..) | Value::Partial(_) => {
            return Err(invalid_argument("Json.encode cannot encode a function"))
        }
        Value::Thunk(_) => unreachable!("ctx.force always resolves a thunk"),
    })
}
