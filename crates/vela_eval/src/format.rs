//! Value-to-string formatter for string interpolation and error messages
//! (spec.md §9). Placed in `vela_eval`, not `vela_values` as spec.md's
//! placement note literally suggests, because it must recursively force
//! thunks — a capability only this crate has. Recorded in DESIGN.md.

use vela_values::{EvalError, Value};

use crate::context::EvalContext;
use crate::force::force;

/// Top-level formatting, used by string interpolation: a top-level
/// string value is emitted raw, with no surrounding quotes.
pub fn display_string(value: Value, ctx: &EvalContext) -> Result<String, EvalError> {
    let forced = force(value, ctx)?;
    match &forced {
        Value::Str(s) => Ok(s.as_str().to_string()),
        other => repr(other, ctx),
    }
}

/// Representation used for values nested inside an array/tuple/object —
/// strings are quoted and escaped there, unlike at the top level.
fn repr(value: &Value, ctx: &EvalContext) -> Result<String, EvalError> {
    match value {
        Value::Int(i) => Ok(i.raw().to_string()),
        Value::Float(f) => Ok(format_float(*f)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Symbol(name) => Ok(format!("#{}", ctx.interner.resolve(*name))),
        Value::Str(s) => Ok(quote(s.as_str())),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items.iter() {
                let forced = force(item.clone(), ctx)?;
                parts.push(repr(&forced, ctx)?);
            }
            Ok(format!("[{}]", parts.join(", ")))
        }
        Value::Tuple(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items.iter() {
                let forced = force(item.clone(), ctx)?;
                parts.push(repr(&forced, ctx)?);
            }
            Ok(format!("({})", parts.join(", ")))
        }
        Value::Object(object) => {
            let mut parts = Vec::with_capacity(object.fields.len());
            for field in &object.fields {
                let forced = force(field.value.clone(), ctx)?;
                parts.push(format!("{}: {}", field.name, repr(&forced, ctx)?));
            }
            Ok(format!("{{ {} }}", parts.join(", ")))
        }
        Value::Function(_) | Value::Native(..) | Value::Partial(_) => Ok("<function>".to_string()),
        Value::Thunk(_) => {
            let forced = force(value.clone(), ctx)?;
            repr(&forced, ctx)
        }
        Value::Range(range) => {
            let op = if range.inclusive { "..=" } else { ".." };
            Ok(format!("{}{op}{}", range.start, range.end))
        }
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use vela_ir::StringInterner;

    use super::*;

    fn ctx() -> EvalContext {
        EvalContext::new(Rc::new(StringInterner::new()), Vec::<PathBuf>::new(), "test")
    }

    #[test]
    fn top_level_string_is_unquoted() {
        let ctx = ctx();
        assert_eq!(display_string(Value::string("hi"), &ctx).unwrap(), "hi");
    }

    #[test]
    fn nested_string_is_quoted() {
        let ctx = ctx();
        let array = Value::array(vec![Value::string("hi")]);
        assert_eq!(display_string(array, &ctx).unwrap(), "[\"hi\"]");
    }

    #[test]
    fn whole_float_keeps_one_decimal() {
        let ctx = ctx();
        assert_eq!(display_string(Value::Float(2.0), &ctx).unwrap(), "2.0");
    }
}
