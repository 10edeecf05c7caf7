//! `let` (spec.md §4.4) and `where` (spec.md §4.5) binding protocols.

use std::rc::Rc;

use vela_ir::{ExprId, Pattern, PatternId, SharedArena, WhereBinding};
use vela_values::{Environment, EvalResult, ThunkCell, Value};

use crate::context::EvalContext;
use crate::pattern_match::match_pattern;

/// `let pat = val in body`. Self-reference for a simple-identifier
/// pattern; strict evaluate-then-match for anything else. A doc comment
/// attached to a binding whose value is a lambda becomes that function's
/// docstring, and the binding's own name becomes its recorded name (spec.md
/// §4.4).
pub fn eval_let(
    arena: &SharedArena,
    pattern_id: PatternId,
    value: ExprId,
    body: ExprId,
    doc: Option<Rc<str>>,
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let pattern = arena.pattern(pattern_id);
    let body_env = if let Some(name) = pattern.as_simple_identifier() {
        let placeholder_env = env.extend_single(name, Value::Null);
        let value = crate::eval::evaluate(arena, value, &placeholder_env, ctx)?;
        let value = attach_function_identity(value, name, doc);
        placeholder_env.set_innermost(value);
        placeholder_env
    } else {
        let value = crate::eval::evaluate(arena, value, env, ctx)?;
        match_pattern(pattern, value, env, ctx)?
    };
    crate::eval::evaluate(arena, body, &body_env, ctx)
}

fn attach_function_identity(value: Value, name: vela_ir::Name, doc: Option<Rc<str>>) -> Value {
    let Value::Function(f) = &value else {
        return value;
    };
    let mut updated = (**f).clone();
    updated.name = Some(name);
    if updated.doc.is_none() {
        updated.doc = doc;
    }
    Value::function(updated)
}

/// `body where { p1 = v1; ... }`. Implements the two-pass thunk /
/// back-patch protocol for mutually recursive identifier bindings,
/// followed by strict evaluation of non-identifier bindings.
pub fn eval_where(
    arena: &SharedArena,
    body: ExprId,
    bindings: &[WhereBinding],
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let current_dir = ctx.current_file();

    // Pass 1: allocate a thunk per identifier binding and bind its name,
    // capturing a throwaway root environment for now.
    let mut extended = env.clone();
    let mut cells = Vec::new();
    let mut non_identifier = Vec::new();

    for binding in bindings {
        let pattern: &Pattern = arena.pattern(binding.pattern);
        if let Some(name) = pattern.as_simple_identifier() {
            let cell = ThunkCell::new(
                binding.value,
                arena.clone(),
                Environment::root(),
                current_dir.clone(),
                None,
            );
            let thunk_value = Value::thunk(cell);
            let Value::Thunk(handle) = thunk_value.clone() else {
                unreachable!("Value::thunk always produces Value::Thunk")
            };
            extended = extended.extend_single(name, thunk_value);
            cells.push(handle);
        } else {
            non_identifier.push(binding);
        }
    }

    // Pass 2: back-patch every thunk's captured environment now that all
    // identifier-bound names exist in `extended`.
    for cell in &cells {
        cell.rebind_env(extended.clone());
    }

    // Pass 3: non-identifier bindings evaluate strictly in `extended` and
    // extend it further; they cannot participate in the recursive knot.
    for binding in non_identifier {
        let pattern = arena.pattern(binding.pattern);
        let value = crate::eval::evaluate(arena, binding.value, &extended, ctx)?;
        extended = match_pattern(pattern, value, &extended, ctx)?;
    }

    crate::eval::evaluate(arena, body, &extended, ctx)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use vela_ir::{ExprArena, ExprKind, Name, PatternKind, Span};

    use super::*;

    fn ctx() -> EvalContext {
        EvalContext::new(
            Rc::new(vela_ir::StringInterner::new()),
            Vec::<PathBuf>::new(),
            "test",
        )
    }

    #[test]
    fn let_with_identifier_pattern_self_references() {
        let mut arena = ExprArena::new();
        // let f = 5 in f
        let value = arena.push_expr(ExprKind::Int(5), Span::DUMMY);
        let name = Name::from_raw(1);
        let pattern = arena.push_pattern(Pattern::new(PatternKind::Identifier(name), Span::DUMMY));
        let body = arena.push_expr(ExprKind::Ident(name), Span::DUMMY);
        let arena: SharedArena = Rc::new(arena);

        let env = Environment::root();
        let ctx = ctx();
        let result = eval_let(&arena, pattern, value, body, None, &env, &ctx).unwrap();
        assert_eq!(result, Value::int(5));
    }

    #[test]
    fn where_bindings_are_mutually_visible() {
        let mut arena = ExprArena::new();
        // (a where { a = b; b = 1 })
        let name_a = Name::from_raw(1);
        let name_b = Name::from_raw(2);
        let b_value = arena.push_expr(ExprKind::Int(1), Span::DUMMY);
        let a_value = arena.push_expr(ExprKind::Ident(name_b), Span::DUMMY);
        let body = arena.push_expr(ExprKind::Ident(name_a), Span::DUMMY);
        let pattern_a = arena.push_pattern(Pattern::new(PatternKind::Identifier(name_a), Span::DUMMY));
        let pattern_b = arena.push_pattern(Pattern::new(PatternKind::Identifier(name_b), Span::DUMMY));
        let bindings = vec![
            WhereBinding { pattern: pattern_a, value: a_value, doc: None },
            WhereBinding { pattern: pattern_b, value: b_value, doc: None },
        ];
        let arena: SharedArena = Rc::new(arena);

        let env = Environment::root();
        let ctx = ctx();
        let result = eval_where(&arena, body, &bindings, &env, &ctx).unwrap();
        assert_eq!(result, Value::int(1));
    }
}
