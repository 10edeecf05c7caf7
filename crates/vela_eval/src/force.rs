//! The thunk state-machine driver (spec.md §4.2).
//!
//! Lives here rather than in `vela_values` because driving a thunk means
//! re-entering [`crate::eval::evaluate`] — putting it in the value crate
//! would create a cycle.

use vela_ir::{ExprId, ExprKind, SharedArena, Span, TemplatePart};
use vela_values::{cyclic_reference, EvalError, EvalResult, Heap, ThunkCell, ThunkState, Value};

use crate::context::EvalContext;

/// Forces `value`: identity on anything but a thunk, drives the state
/// machine on a thunk. Idempotent on an already-evaluated thunk (spec.md
/// §8's `force(force(v)) = force(v)`).
pub fn force(value: Value, ctx: &EvalContext) -> EvalResult {
    match value {
        Value::Thunk(cell) => force_cell(&cell, ctx),
        other => Ok(other),
    }
}

fn force_cell(cell: &Heap<ThunkCell>, ctx: &EvalContext) -> EvalResult {
    {
        let state = cell.state.borrow();
        match &*state {
            ThunkState::Evaluated(v) => return Ok(v.clone()),
            ThunkState::Evaluating => {
                return Err(cyclic_error(cell));
            }
            ThunkState::Unevaluated => {}
        }
    }

    *cell.state.borrow_mut() = ThunkState::Evaluating;

    let env = cell.env();
    let result = ctx.with_file(cell.current_dir.clone(), || {
        crate::eval::evaluate(&cell.arena, cell.expr, &env, ctx)
    });

    match result {
        Ok(value) => {
            // `force` on the result handles a thunk that itself evaluated to
            // another thunk (e.g. an identifier bound to a field thunk).
            let forced = force(value, ctx)?;
            *cell.state.borrow_mut() = ThunkState::Evaluated(forced.clone());
            Ok(forced)
        }
        Err(err) => {
            // Leave the cell in `Evaluating` so a second concurrent force
            // (impossible here, single-threaded) or a caller retrying after
            // catching a non-fatal error still reports the cycle rather
            // than silently re-running a partially failed computation.
            Err(err)
        }
    }
}

fn cyclic_error(cell: &Heap<ThunkCell>) -> EvalError {
    let err = cyclic_reference();
    let Some(def_span) = cell.field_key_span else {
        return err;
    };
    let reference_span = find_reference_site(&cell.arena, cell.expr).unwrap_or(def_span);
    err.at(reference_span).with_secondary(def_span, "defined here")
}

/// Pre-order walk for the first identifier or field-access expression
/// reachable from `expr`, used to point the cyclic-reference diagnostic
/// at the reference site rather than only the field's definition.
fn find_reference_site(arena: &SharedArena, expr: ExprId) -> Option<Span> {
    match arena.kind(expr) {
        ExprKind::Ident(_) => Some(arena.span(expr)),
        ExprKind::FieldAccess { name_span, .. } => Some(*name_span),

        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Bool(_)
        | ExprKind::Null
        | ExprKind::Symbol(_)
        | ExprKind::Str(_)
        | ExprKind::Import { .. }
        | ExprKind::FieldAccessor(_)
        | ExprKind::OperatorAsFunction(_) => None,

        ExprKind::Interp(parts) => arena.template_parts(*parts).iter().find_map(|part| match part {
            TemplatePart::Literal(_) => None,
            TemplatePart::Expr(id) => find_reference_site(arena, *id),
        }),

        ExprKind::Lambda { body, .. } => find_reference_site(arena, *body),
        ExprKind::Apply { func, arg } => {
            find_reference_site(arena, *func).or_else(|| find_reference_site(arena, *arg))
        }
        ExprKind::Let { value, body, .. } => {
            find_reference_site(arena, *value).or_else(|| find_reference_site(arena, *body))
        }
        ExprKind::Where { body, bindings } => arena
            .where_bindings(*bindings)
            .iter()
            .find_map(|binding| find_reference_site(arena, binding.value))
            .or_else(|| find_reference_site(arena, *body)),

        ExprKind::Unary { expr, .. } => find_reference_site(arena, *expr),
        ExprKind::Binary { lhs, rhs, .. } => {
            find_reference_site(arena, *lhs).or_else(|| find_reference_site(arena, *rhs))
        }

        ExprKind::If { cond, then_branch, else_branch } => find_reference_site(arena, *cond)
            .or_else(|| find_reference_site(arena, *then_branch))
            .or_else(|| else_branch.and_then(|id| find_reference_site(arena, id))),
        ExprKind::WhenMatches { scrutinee, arms, otherwise } => find_reference_site(arena, *scrutinee)
            .or_else(|| arena.match_arms(*arms).iter().find_map(|arm| find_reference_site(arena, arm.body)))
            .or_else(|| otherwise.and_then(|id| find_reference_site(arena, id))),

        ExprKind::Array(elements) => arena.array_elements(*elements).iter().find_map(|element| {
            find_reference_site(arena, element.value)
                .or_else(|| element.condition.and_then(|id| find_reference_site(arena, id)))
        }),
        ExprKind::Tuple(items) => arena.expr_list(*items).iter().find_map(|id| find_reference_site(arena, *id)),
        ExprKind::Object(fields) => arena.fields(*fields).iter().find_map(|field| field_reference_site(arena, field)),
        ExprKind::ObjectExtend { base, fields } => find_reference_site(arena, *base)
            .or_else(|| arena.fields(*fields).iter().find_map(|field| field_reference_site(arena, field))),

        ExprKind::ArrayComp { body, clauses, filter } => arena
            .for_clauses(*clauses)
            .iter()
            .find_map(|clause| find_reference_site(arena, clause.iterable))
            .or_else(|| find_reference_site(arena, *body))
            .or_else(|| filter.and_then(|id| find_reference_site(arena, id))),
        ExprKind::ObjectComp { key, value, clauses, filter } => arena
            .for_clauses(*clauses)
            .iter()
            .find_map(|clause| find_reference_site(arena, clause.iterable))
            .or_else(|| find_reference_site(arena, *key))
            .or_else(|| find_reference_site(arena, *value))
            .or_else(|| filter.and_then(|id| find_reference_site(arena, id))),

        ExprKind::FieldProjection { object, .. } => find_reference_site(arena, *object),
        ExprKind::Index { object, index } => {
            find_reference_site(arena, *object).or_else(|| find_reference_site(arena, *index))
        }
        ExprKind::Range { start, end, .. } => {
            find_reference_site(arena, *start).or_else(|| find_reference_site(arena, *end))
        }
    }
}

fn field_reference_site(arena: &SharedArena, field: &vela_ir::Field) -> Option<Span> {
    let key_site = match &field.key {
        vela_ir::FieldKey::Dynamic(key_expr) => find_reference_site(arena, *key_expr),
        vela_ir::FieldKey::Static(_) => None,
    };
    key_site.or_else(|| find_reference_site(arena, field.value))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use vela_ir::{ExprArena, ExprKind, Span};
    use vela_values::Environment;

    use super::*;

    #[test]
    fn force_is_idempotent_on_plain_values() {
        let ctx = EvalContext::new(Rc::new(vela_ir::StringInterner::new()), Vec::<PathBuf>::new(), "test");
        let v = Value::int(5);
        let once = force(v.clone(), &ctx).unwrap();
        let twice = force(once.clone(), &ctx).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn force_evaluates_thunk_once_and_caches() {
        let mut arena = ExprArena::new();
        let id = arena.push_expr(ExprKind::Int(7), Span::DUMMY);
        let arena = Rc::new(arena);
        let ctx = EvalContext::new(Rc::new(vela_ir::StringInterner::new()), Vec::<PathBuf>::new(), "test");
        let cell = ThunkCell::new(id, arena, Environment::root(), Rc::from("test"), None);
        let value = Value::thunk(cell);

        let first = force(value.clone(), &ctx).unwrap();
        assert_eq!(first, Value::int(7));
        let second = force(value, &ctx).unwrap();
        assert_eq!(second, Value::int(7));
    }

    #[test]
    fn forcing_an_evaluating_thunk_is_a_cycle() {
        let mut arena = ExprArena::new();
        let id = arena.push_expr(ExprKind::Int(1), Span::DUMMY);
        let arena = Rc::new(arena);
        let cell = ThunkCell::new(id, arena, Environment::root(), Rc::from("test"), None);
        *cell.state.borrow_mut() = ThunkState::Evaluating;
        let ctx = EvalContext::new(Rc::new(vela_ir::StringInterner::new()), Vec::<PathBuf>::new(), "test");
        let result = force(Value::thunk(cell), &ctx);
        assert!(result.is_err());
    }
}
