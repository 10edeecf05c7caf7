//! Pattern matcher (spec.md §4.1): destructures a value against a pattern,
//! extending an environment, or fails with a typed mismatch.

use vela_ir::{Pattern, PatternKind, PatternLiteral};
use vela_values::{type_mismatch, Environment, ErrorKind, EvalError, Value};

use crate::context::EvalContext;
use crate::force::force;

pub type MatchResult = Result<Environment, EvalError>;

/// Matches `value` against `pattern`, extending `base_env`. On failure
/// returns a `type_mismatch` located at the pattern's span, per spec.md
/// §4.1.
pub fn match_pattern(
    pattern: &Pattern,
    value: Value,
    base_env: &Environment,
    ctx: &EvalContext,
) -> MatchResult {
    match &pattern.kind {
        PatternKind::Identifier(name) => {
            ctx.register_name(ctx.interner.resolve(*name));
            Ok(base_env.extend_single(*name, value))
        }

        PatternKind::Literal(lit) => {
            let forced = force(value, ctx)?;
            if literal_matches(lit, &forced) {
                Ok(base_env.clone())
            } else {
                Err(mismatch(describe_literal(lit), forced.type_name(), pattern))
            }
        }

        PatternKind::Tuple(elements) => {
            let forced = force(value, ctx)?;
            let Value::Tuple(items) = forced else {
                return Err(mismatch("tuple".to_string(), forced.type_name(), pattern));
            };
            if items.len() != elements.len() {
                return Err(mismatch(
                    format!("tuple of {} element(s)", elements.len()),
                    &format!("tuple of {} element(s)", items.len()),
                    pattern,
                ));
            }
            let mut env = base_env.clone();
            for (sub_pattern, item) in elements.iter().zip(items.iter()) {
                env = match_pattern(sub_pattern, item.clone(), &env, ctx)?;
            }
            Ok(env)
        }

        PatternKind::Array { elements, rest } => {
            let forced = force(value, ctx)?;
            let Value::Array(items) = forced else {
                return Err(mismatch("array".to_string(), forced.type_name(), pattern));
            };
            let min_len = elements.len();
            if rest.is_none() && items.len() != min_len {
                return Err(mismatch(
                    format!("array of {min_len} element(s)"),
                    &format!("array of {} element(s)", items.len()),
                    pattern,
                ));
            }
            if rest.is_some() && items.len() < min_len {
                return Err(mismatch(
                    format!("array of at least {min_len} element(s)"),
                    &format!("array of {} element(s)", items.len()),
                    pattern,
                ));
            }
            let mut env = base_env.clone();
            for (sub_pattern, item) in elements.iter().zip(items.iter()) {
                env = match_pattern(sub_pattern, item.clone(), &env, ctx)?;
            }
            if let Some(rest_name) = rest {
                let tail: Vec<Value> = items[min_len..].to_vec();
                env = env.extend_single(*rest_name, Value::array(tail));
            }
            Ok(env)
        }

        PatternKind::Object(fields) => {
            let forced = force(value, ctx)?;
            let Value::Object(object) = forced else {
                return Err(mismatch("object".to_string(), forced.type_name(), pattern));
            };
            let mut env = base_env.clone();
            for field in fields {
                let Some(found) = object.get(&field.key) else {
                    let available: Vec<String> =
                        object.fields.iter().map(|f| f.name.to_string()).collect();
                    let message = format!(
                        "expected field `{}`, available fields: {}",
                        field.key,
                        available.join(", ")
                    );
                    return Err(EvalError::new(
                        ErrorKind::TypeMismatch {
                            expected: format!("field `{}`", field.key),
                            found: "missing".to_string(),
                            operation: Some("destructuring".to_string()),
                        },
                        message,
                    )
                    .at(field.key_span));
                };
                let forced_field = force(found.value.clone(), ctx)?;
                env = match_pattern(&field.pattern, forced_field, &env, ctx)?;
            }
            Ok(env)
        }
    }
}

fn mismatch(expected: String, found: &str, pattern: &Pattern) -> EvalError {
    type_mismatch(expected, found.to_string(), Some("destructuring")).at(pattern.span)
}

fn literal_matches(lit: &PatternLiteral, value: &Value) -> bool {
    match (lit, value) {
        (PatternLiteral::Int(a), Value::Int(b)) => *a == b.raw(),
        (PatternLiteral::Float(a), Value::Float(b)) => a == b,
        (PatternLiteral::Bool(a), Value::Bool(b)) => a == b,
        (PatternLiteral::Null, Value::Null) => true,
        (PatternLiteral::Symbol(a), Value::Symbol(b)) => a == b,
        (PatternLiteral::Str(a), Value::Str(b)) => &**a == b.as_str(),
        _ => false,
    }
}

fn describe_literal(lit: &PatternLiteral) -> String {
    match lit {
        PatternLiteral::Int(_) => "int".to_string(),
        PatternLiteral::Float(_) => "float".to_string(),
        PatternLiteral::Bool(_) => "bool".to_string(),
        PatternLiteral::Null => "null".to_string(),
        PatternLiteral::Symbol(_) => "symbol".to_string(),
        PatternLiteral::Str(_) => "string".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use vela_ir::{Name, Span, StringInterner};

    use super::*;

    fn ctx() -> EvalContext {
        EvalContext::new(Rc::new(StringInterner::new()), Vec::<PathBuf>::new(), "test")
    }

    #[test]
    fn identifier_pattern_always_binds() {
        let pattern = Pattern::new(PatternKind::Identifier(Name::from_raw(1)), Span::DUMMY);
        let env = match_pattern(&pattern, Value::int(9), &Environment::root(), &ctx()).unwrap();
        assert_eq!(env.lookup(Name::from_raw(1)), Some(Value::int(9)));
    }

    #[test]
    fn tuple_arity_mismatch_is_type_mismatch() {
        let pattern = Pattern::new(
            PatternKind::Tuple(vec![Pattern::new(
                PatternKind::Identifier(Name::from_raw(1)),
                Span::DUMMY,
            )]),
            Span::DUMMY,
        );
        let value = Value::tuple(vec![Value::int(1), Value::int(2)]);
        let result = match_pattern(&pattern, value, &Environment::root(), &ctx());
        assert!(result.is_err());
    }

    #[test]
    fn array_rest_binds_tail() {
        let rest_name = Name::from_raw(2);
        let pattern = Pattern::new(
            PatternKind::Array {
                elements: vec![Pattern::new(PatternKind::Identifier(Name::from_raw(1)), Span::DUMMY)],
                rest: Some(rest_name),
            },
            Span::DUMMY,
        );
        let value = Value::array(vec![Value::int(1), Value::int(2), Value::int(3)]);
        let env = match_pattern(&pattern, value, &Environment::root(), &ctx()).unwrap();
        assert_eq!(
            env.lookup(rest_name),
            Some(Value::array(vec![Value::int(2), Value::int(3)]))
        );
    }
}
