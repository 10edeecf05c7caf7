//! `Yaml.parse` / `Yaml.encode` (spec.md §6).

use vela_values::{invalid_argument, EvalResult, NativeContext, ObjectValue, Value, ValueField};

use super::support::{err, expect_str, ok};

pub fn parse(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let text = expect_str(arg, "Yaml.parse")?;
    match serde_yaml::from_str::<serde_yaml::Value>(&text) {
        Ok(parsed) => Ok(ok(ctx, from_yaml(parsed, ctx))),
        Err(e) => Ok(err(ctx, e.to_string())),
    }
}

pub fn encode(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let yaml = to_yaml(arg.clone(), ctx)?;
    let text = serde_yaml::to_string(&yaml).map_err(|e| invalid_argument(e.to_string()))?;
    Ok(Value::string(text))
}

fn from_yaml(value: serde_yaml::Value, ctx: &dyn NativeContext) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => Value::string(s),
        serde_yaml::Value::Sequence(items) => {
            Value::array(items.into_iter().map(|v| from_yaml(v, ctx)).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let fields = map
                .into_iter()
                .filter_map(|(k, v)| {
                    let name = k.as_str().map(|s| s.to_string())?;
                    Some(ValueField { name: name.into(), value: from_yaml(v, ctx), is_patch: false })
                })
                .collect();
            Value::object(ObjectValue { fields, doc: None })
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value, ctx),
    }
}

fn to_yaml(value: Value, ctx: &dyn NativeContext) -> Result<serde_yaml::Value, vela_values::EvalError> {
    let forced = ctx.force(value)?;
    Ok(match forced {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(b),
        Value::Int(i) => serde_yaml::Value::Number(i.raw().into()),
        Value::Float(f) => serde_yaml::Value::Number(f.into()),
        Value::Str(s) => serde_yaml::Value::String(s.to_string()),
        Value::Symbol(_) => return Err(invalid_argument("Yaml.encode cannot encode a symbol")),
        Value::Array(items) | Value::Tuple(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(to_yaml(item.clone(), ctx)?);
            }
            serde_yaml::Value::Sequence(out)
        }
        Value::Object(obj) => {
            let mut map = serde_yaml::Mapping::new();
            for field in &obj.fields {
                map.insert(serde_yaml::Value::String(field.name.to_string()), to_yaml(field.value.clone(), ctx)?);
            }
            serde_yaml::Value::Mapping(map)
        }
        Value::Range(_) => return Err(invalid_argument("Yaml.encode cannot encode a range")),
        Value::Function(_) | Value::Native(..) | Value::Partial(_) => {
            return Err(invalid_argument("Yaml.encode cannot encode a function"))
        }
        Value::Thunk(_) => unreachable!("ctx.force always resolves a thunk"),
    })
}
