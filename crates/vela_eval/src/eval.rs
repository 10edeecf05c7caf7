//! The expression evaluator dispatcher (spec.md §4.3): `evaluate(arena,
//! expr, env, ctx) -> value | error`.

use std::rc::Rc;

use vela_ir::{
    ArrayElement, ArrayElementKind, ExprId, ExprKind, Field, FieldKey, ForClause, MatchArm, Name,
    SharedArena, Span, TemplatePart,
};
use vela_values::{
    expected_function, field_not_found, index_out_of_bounds, type_mismatch, unknown_field,
    unknown_identifier, Environment, ErrorKind, EvalError, EvalResult, FunctionValue,
    NativeContext, ObjectValue, PartialApp, RangeValue, StackFrame, Value, ValueField,
};

use crate::context::EvalContext;
use crate::force::force;
use crate::merge;
use crate::operators;
use crate::pattern_match::match_pattern;

/// Evaluates one expression. Re-grows the stack on every call (spec.md
/// §5's recursive-descent model has no bound on nesting depth other than
/// the host stack).
pub fn evaluate(arena: &SharedArena, expr: ExprId, env: &Environment, ctx: &EvalContext) -> EvalResult {
    vela_stack::ensure_sufficient_stack(|| {
        evaluate_inner(arena, expr, env, ctx).map_err(|err| {
            if err.has_call_stack() {
                err
            } else {
                err.with_call_stack(ctx.snapshot_call_stack())
            }
        })
    })
}

fn evaluate_inner(arena: &SharedArena, expr: ExprId, env: &Environment, ctx: &EvalContext) -> EvalResult {
    let span = arena.span(expr);
    match arena.kind(expr).clone() {
        ExprKind::Int(n) => Ok(Value::int(n)),
        ExprKind::Float(f) => Ok(Value::Float(f)),
        ExprKind::Bool(b) => Ok(Value::Bool(b)),
        ExprKind::Null => Ok(Value::Null),
        ExprKind::Symbol(name) => Ok(Value::Symbol(name)),
        ExprKind::Str(id) => Ok(Value::string(arena.string(id))),

        ExprKind::Interp(range) => {
            let mut out = String::new();
            for part in arena.template_parts(range) {
                match part {
                    TemplatePart::Literal(id) => out.push_str(arena.string(*id)),
                    TemplatePart::Expr(sub) => {
                        let value = evaluate(arena, *sub, env, ctx)?;
                        out.push_str(&crate::format::display_string(value, ctx)?);
                    }
                }
            }
            Ok(Value::string(out))
        }

        ExprKind::Ident(name) => eval_identifier(name, span, env, ctx),

        ExprKind::Lambda { param, body, doc } => Ok(Value::function(FunctionValue {
            param,
            body,
            env: env.clone(),
            arena: arena.clone(),
            current_dir: ctx.current_file(),
            doc: doc.map(|id| Rc::from(arena.string(id))),
            name: None,
        })),

        ExprKind::Apply { func, arg } => {
            let func_val = evaluate(arena, func, env, ctx)?;
            let arg_val = evaluate(arena, arg, env, ctx)?;
            apply_value(
                func_val,
                arg_val,
                arena.span(func),
                arena.span(arg),
                ident_name(arena, func),
                ctx,
            )
        }

        ExprKind::Let { pattern, value, body, doc } => {
            let doc_text = doc.map(|id| Rc::from(arena.string(id)));
            crate::bind::eval_let(arena, pattern, value, body, doc_text, env, ctx)
        }
        ExprKind::Where { body, bindings } => {
            crate::bind::eval_where(arena, body, arena.where_bindings(bindings), env, ctx)
        }

        ExprKind::Unary { op, expr: operand } => {
            let value = force(evaluate(arena, operand, env, ctx)?, ctx)?;
            operators::evaluate_unary(op, value).map_err(|err| err.at(span))
        }
        ExprKind::Binary { op, lhs, rhs } => eval_binary(arena, expr, op, lhs, rhs, env, ctx),

        ExprKind::If { cond, then_branch, else_branch } => {
            let condition = force(evaluate(arena, cond, env, ctx)?, ctx)?;
            let Value::Bool(b) = condition else {
                return Err(type_mismatch(
                    "bool",
                    condition.type_name().to_string(),
                    Some("if condition"),
                )
                .at(arena.span(cond)));
            };
            if b {
                evaluate(arena, then_branch, env, ctx)
            } else if let Some(else_branch) = else_branch {
                evaluate(arena, else_branch, env, ctx)
            } else {
                Ok(Value::Null)
            }
        }
        ExprKind::WhenMatches { scrutinee, arms, otherwise } => {
            eval_when_matches(arena, span, scrutinee, arena.match_arms(arms), otherwise, env, ctx)
        }

        ExprKind::Array(range) => eval_array(arena, arena.array_elements(range), env, ctx),
        ExprKind::Tuple(range) => {
            let mut items = Vec::new();
            for id in arena.expr_list(range) {
                items.push(evaluate(arena, *id, env, ctx)?);
            }
            Ok(Value::tuple(items))
        }
        ExprKind::Object(range) => eval_object_literal(arena, arena.fields(range), env, ctx),
        ExprKind::ObjectExtend { base, fields } => {
            eval_object_extend(arena, span, base, arena.fields(fields), env, ctx)
        }

        ExprKind::ArrayComp { body, clauses, filter } => {
            eval_array_comp(arena, body, arena.for_clauses(clauses), filter, env, ctx)
        }
        ExprKind::ObjectComp { key, value, clauses, filter } => {
            eval_object_comp(arena, key, value, arena.for_clauses(clauses), filter, env, ctx)
        }

        ExprKind::Import { path, path_span } => {
            let path_str = arena.string(path).to_string();
            crate::module::import(&path_str, path_span, ctx)
        }
        ExprKind::FieldAccess { object, name, name_span } => {
            let obj = evaluate(arena, object, env, ctx)?;
            access_field(obj, ctx.interner.resolve(name), name_span, ctx)
        }
        ExprKind::Index { object, index } => {
            let obj = evaluate(arena, object, env, ctx)?;
            let index_val = evaluate(arena, index, env, ctx)?;
            index_value(obj, index_val, span, ctx)
        }
        ExprKind::FieldAccessor(range) => {
            let names: Vec<Rc<str>> = arena
                .name_list(range)
                .iter()
                .map(|n| Rc::from(ctx.interner.resolve(*n)))
                .collect();
            Ok(Value::partial(PartialApp::FieldAccessor(names.into())))
        }
        ExprKind::FieldProjection { object, names } => {
            eval_field_projection(arena, span, object, arena.name_list(names), env, ctx)
        }
        ExprKind::OperatorAsFunction(op) => Ok(Value::partial(PartialApp::Operator(op))),

        ExprKind::Range { start, end, inclusive } => {
            let s = force(evaluate(arena, start, env, ctx)?, ctx)?;
            let e = force(evaluate(arena, end, env, ctx)?, ctx)?;
            let (Value::Int(s), Value::Int(e)) = (s, e) else {
                return Err(type_mismatch("int", "non-int range endpoint", Some("range")).at(span));
            };
            Ok(Value::Range(RangeValue { start: s.raw(), end: e.raw(), inclusive }))
        }
    }
}

fn ident_name(arena: &SharedArena, id: ExprId) -> Option<Name> {
    match arena.kind(id) {
        ExprKind::Ident(name) => Some(*name),
        _ => None,
    }
}

fn eval_identifier(name: Name, span: Span, env: &Environment, ctx: &EvalContext) -> EvalResult {
    match env.lookup(name) {
        Some(value) => force(value, ctx),
        None => {
            let name_str = ctx.interner.resolve(name);
            let known = ctx.known_names();
            let suggestion =
                crate::suggest::suggest_similar(name_str, known.iter().map(|s| s.as_ref()));
            let mut err = unknown_identifier(name_str);
            if let Some(suggestion) = suggestion {
                err.message = format!("{}; did you mean `{suggestion}`?", err.message);
            }
            Err(err.at(span))
        }
    }
}

fn eval_binary(
    arena: &SharedArena,
    expr: ExprId,
    op: vela_ir::BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    use vela_ir::BinaryOp;

    match op {
        BinaryOp::Pipeline => {
            let x = evaluate(arena, lhs, env, ctx)?;
            let f = evaluate(arena, rhs, env, ctx)?;
            apply_value(f, x, arena.span(rhs), arena.span(lhs), ident_name(arena, rhs), ctx)
        }
        BinaryOp::Merge => {
            let left = force(evaluate(arena, lhs, env, ctx)?, ctx)?;
            let right = force(evaluate(arena, rhs, env, ctx)?, ctx)?;
            match (left, right) {
                (Value::Object(base), Value::Object(extension)) => {
                    Ok(Value::object(merge::merge(&base, &extension)))
                }
                (left, right) => Err(type_mismatch(
                    "two objects",
                    format!("{} and {}", left.type_name(), right.type_name()),
                    Some("merge `&`"),
                )
                .at(arena.span(expr))),
            }
        }
        _ => {
            let left = force(evaluate(arena, lhs, env, ctx)?, ctx)?;
            let right = force(evaluate(arena, rhs, env, ctx)?, ctx)?;
            operators::evaluate_binary(left, op, right, ctx).map_err(|err| {
                let target_span = match &err.kind {
                    ErrorKind::DivisionByZero => arena.span(rhs),
                    _ => arena.span(expr),
                };
                err.at(target_span)
            })
        }
    }
}

/// Applies `func` to `arg`. `func_span`/`arg_span` are the call and
/// argument sites respectively, used to locate `expected_function` and
/// pattern-mismatch errors per spec.md §4.3.
pub(crate) fn apply_value(
    func: Value,
    arg: Value,
    func_span: Span,
    arg_span: Span,
    callee_name: Option<Name>,
    ctx: &EvalContext,
) -> EvalResult {
    let func = force(func, ctx)?;
    match func {
        Value::Function(f) => {
            ctx.push_frame(StackFrame {
                function_name: f.name.map(|n| ctx.interner.resolve(n).to_string()),
                filename: f.current_dir.to_string(),
                span: func_span,
                is_native: false,
            });
            let param_pattern = f.arena.pattern(f.param);
            let outcome = match match_pattern(param_pattern, arg, &f.env, ctx) {
                Ok(call_env) => crate::eval::evaluate(&f.arena, f.body, &call_env, ctx),
                Err(mut err) => {
                    err = err.at(arg_span);
                    if let Some(name) = callee_name {
                        let resolved = ctx.interner.resolve(name);
                        err.message = format!("calling function `{resolved}`: {}", err.message);
                    }
                    Err(err)
                }
            };
            ctx.pop_frame();
            outcome
        }
        Value::Native(name, native_fn) => {
            ctx.push_frame(StackFrame {
                function_name: Some(ctx.interner.resolve(name).to_string()),
                filename: ctx.current_file().to_string(),
                span: func_span,
                is_native: true,
            });
            let outcome = native_fn(ctx as &dyn NativeContext, &arg);
            ctx.pop_frame();
            outcome
        }
        Value::Partial(app) => apply_partial(&app, arg, ctx),
        other => Err(expected_function(other.type_name().to_string()).at(func_span)),
    }
}

fn apply_partial(app: &PartialApp, arg: Value, ctx: &EvalContext) -> EvalResult {
    match app {
        PartialApp::FieldAccessor(names) => {
            let mut current = force(arg, ctx)?;
            for name in names.iter() {
                current = access_field(current, name, Span::DUMMY, ctx)?;
            }
            Ok(current)
        }
        PartialApp::Operator(op) => Ok(Value::partial(PartialApp::OperatorPartial(*op, Box::new(arg)))),
        PartialApp::OperatorPartial(op, left) => {
            let left = force((**left).clone(), ctx)?;
            let right = force(arg, ctx)?;
            operators::evaluate_binary(left, *op, right, ctx)
        }
    }
}

fn access_field(object: Value, name: &str, span: Span, ctx: &EvalContext) -> EvalResult {
    let forced = force(object, ctx)?;
    let Value::Object(object) = forced else {
        return Err(type_mismatch("object", forced.type_name().to_string(), Some("field access")).at(span));
    };
    match object.get(name) {
        Some(field) => force(field.value.clone(), ctx),
        None => Err(unknown_field(name, available_names(&object)).at(span)),
    }
}

fn index_value(object: Value, index: Value, span: Span, ctx: &EvalContext) -> EvalResult {
    let forced = force(object, ctx)?;
    match &forced {
        Value::Array(items) => {
            let index = force(index, ctx)?;
            let Value::Int(i) = index else {
                return Err(type_mismatch("int", index.type_name().to_string(), Some("index")).at(span));
            };
            let raw = i.raw();
            if raw < 0 || raw as usize >= items.len() {
                return Err(index_out_of_bounds(raw, items.len()).at(span));
            }
            Ok(items[raw as usize].clone())
        }
        Value::Object(object) => {
            let key = force(index, ctx)?;
            let key_str = match &key {
                Value::Str(s) => s.as_str().to_string(),
                Value::Symbol(name) => ctx.interner.resolve(*name).to_string(),
                other => {
                    return Err(
                        type_mismatch("string or symbol", other.type_name().to_string(), Some("index")).at(span),
                    )
                }
            };
            match object.get(&key_str) {
                Some(field) => force(field.value.clone(), ctx),
                None => Err(field_not_found(key_str).at(span)),
            }
        }
        other => Err(type_mismatch("array or object", other.type_name().to_string(), Some("index")).at(span)),
    }
}

fn available_names(object: &ObjectValue) -> Vec<String> {
    object.fields.iter().take(10).map(|f| f.name.to_string()).collect()
}

fn eval_when_matches(
    arena: &SharedArena,
    span: Span,
    scrutinee: ExprId,
    arms: &[MatchArm],
    otherwise: Option<ExprId>,
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let value = evaluate(arena, scrutinee, env, ctx)?;
    for arm in arms {
        let pattern = arena.pattern(arm.pattern);
        match match_pattern(pattern, value.clone(), env, ctx) {
            Ok(arm_env) => return evaluate(arena, arm.body, &arm_env, ctx),
            Err(err) if matches!(err.kind, ErrorKind::TypeMismatch { .. }) => continue,
            Err(err) => return Err(err),
        }
    }
    match otherwise {
        Some(otherwise) => evaluate(arena, otherwise, env, ctx),
        None => Err(type_mismatch("a matching arm", "no arm matched", Some("when-matches")).at(span)),
    }
}

fn eval_array(
    arena: &SharedArena,
    elements: &[ArrayElement],
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        match element.kind {
            ArrayElementKind::Normal => out.push(evaluate(arena, element.value, env, ctx)?),
            ArrayElementKind::Spread => {
                let spread = force(evaluate(arena, element.value, env, ctx)?, ctx)?;
                let Value::Array(items) = spread else {
                    return Err(type_mismatch(
                        "array",
                        spread.type_name().to_string(),
                        Some("array spread"),
                    )
                    .at(arena.span(element.value)));
                };
                out.extend(items.iter().cloned());
            }
            ArrayElementKind::ConditionalIf | ArrayElementKind::ConditionalUnless => {
                let condition_expr = match element.condition {
                    Some(condition_expr) => condition_expr,
                    None => unreachable!("conditional array element always carries a condition"),
                };
                let condition = force(evaluate(arena, condition_expr, env, ctx)?, ctx)?;
                let Value::Bool(b) = condition else {
                    return Err(type_mismatch(
                        "bool",
                        condition.type_name().to_string(),
                        Some("array conditional element"),
                    )
                    .at(arena.span(condition_expr)));
                };
                let include = if element.kind == ArrayElementKind::ConditionalIf { b } else { !b };
                if include {
                    out.push(evaluate(arena, element.value, env, ctx)?);
                }
            }
        }
    }
    Ok(Value::array(out))
}

/// Object fields are mutually recursive, like `where` bindings
/// (`bind.rs::eval_where`): every field sees every sibling by bare name,
/// and a field that refers to itself hits the `Evaluating` state rather
/// than an unbound identifier.
fn eval_object_literal(
    arena: &SharedArena,
    fields: &[Field],
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    // Pass 1: resolve every field's key against the outer environment --
    // a dynamic key's name isn't known until it's evaluated, so it can't
    // join the recursive knot -- and allocate a thunk per resulting name
    // with a throwaway captured environment.
    let mut named_fields = Vec::with_capacity(fields.len());
    for field in fields {
        expand_field_keys(arena, field, env, ctx, &mut |name| {
            named_fields.push((name, field));
        })?;
    }

    let mut extended = env.clone();
    let mut cells = Vec::with_capacity(named_fields.len());
    let mut out = Vec::with_capacity(named_fields.len());
    for (name, field) in &named_fields {
        let cell = vela_values::ThunkCell::new(
            field.value,
            arena.clone(),
            Environment::root(),
            ctx.current_file(),
            Some(field.key_span),
        );
        let thunk_value = Value::thunk(cell);
        let Value::Thunk(handle) = thunk_value.clone() else {
            unreachable!("Value::thunk always produces Value::Thunk")
        };
        extended = extended.extend_single(ctx.interner.intern(name), thunk_value.clone());
        cells.push(handle);
        out.push(ValueField { name: name.clone(), value: thunk_value, is_patch: field.is_patch });
    }

    // Pass 2: back-patch every thunk's captured environment now that every
    // sibling field name is bound in `extended`.
    for cell in &cells {
        cell.rebind_env(extended.clone());
    }

    Ok(Value::object(ObjectValue { fields: out, doc: None }))
}

/// Resolves a field's key (static or dynamic) to zero or more names,
/// invoking `emit` once per resulting name, per spec.md §4.3's dynamic
/// key expansion rules.
fn expand_field_keys(
    arena: &SharedArena,
    field: &Field,
    env: &Environment,
    ctx: &EvalContext,
    emit: &mut dyn FnMut(Rc<str>),
) -> Result<(), EvalError> {
    match &field.key {
        FieldKey::Static(id) => {
            emit(Rc::from(arena.string(*id)));
            Ok(())
        }
        FieldKey::Dynamic(key_expr) => {
            let key = force(evaluate(arena, *key_expr, env, ctx)?, ctx)?;
            match key {
                Value::Null => Ok(()),
                Value::Str(s) => {
                    emit(Rc::from(s.as_str()));
                    Ok(())
                }
                Value::Array(items) => {
                    for item in items.iter() {
                        let item = force(item.clone(), ctx)?;
                        let Value::Str(s) = item else {
                            return Err(type_mismatch(
                                "string",
                                item.type_name().to_string(),
                                Some("dynamic object key"),
                            )
                            .at(field.key_span));
                        };
                        emit(Rc::from(s.as_str()));
                    }
                    Ok(())
                }
                other => Err(type_mismatch(
                    "null, string, or array of strings",
                    other.type_name().to_string(),
                    Some("dynamic object key"),
                )
                .at(field.key_span)),
            }
        }
    }
}

fn eval_object_extend(
    arena: &SharedArena,
    span: Span,
    base: ExprId,
    fields: &[Field],
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let base_val = force(evaluate(arena, base, env, ctx)?, ctx)?;
    match base_val {
        Value::Object(base_obj) => {
            let mut ext_fields = Vec::with_capacity(fields.len());
            for field in fields {
                // Extension fields evaluate strictly, unlike a plain
                // object literal's lazy field thunks.
                let mut name_targets = Vec::new();
                expand_field_keys(arena, field, env, ctx, &mut |n| name_targets.push(n))?;
                if name_targets.is_empty() {
                    continue;
                }
                let value = force(evaluate(arena, field.value, env, ctx)?, ctx)?;
                for name in name_targets {
                    ext_fields.push(ValueField { name, value: value.clone(), is_patch: field.is_patch });
                }
            }
            let extension = ObjectValue { fields: ext_fields, doc: None };
            Ok(Value::object(merge::merge(&base_obj, &extension)))
        }
        Value::Function(_) | Value::Native(..) | Value::Partial(_) => {
            let arg_object = eval_object_literal(arena, fields, env, ctx)?;
            apply_value(base_val, arg_object, arena.span(base), span, ident_name(arena, base), ctx)
        }
        other => Err(type_mismatch(
            "object or function",
            other.type_name().to_string(),
            Some("object-extend"),
        )
        .at(span)),
    }
}

/// One iteration's worth of bound values for a for-clause's iterable.
fn iterate_value(value: Value, ctx: &EvalContext) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::Array(items) => Ok(items.iter().cloned().collect()),
        Value::Range(range) => Ok(range.iter().map(Value::int).collect()),
        Value::Object(object) => {
            let mut out = Vec::with_capacity(object.fields.len());
            for field in &object.fields {
                let forced = force(field.value.clone(), ctx)?;
                out.push(Value::tuple(vec![Value::string(&*field.name), forced]));
            }
            Ok(out)
        }
        other => Err(type_mismatch(
            "array, range, or object",
            other.type_name().to_string(),
            Some("comprehension iterable"),
        )),
    }
}

fn eval_array_comp(
    arena: &SharedArena,
    body: ExprId,
    clauses: &[ForClause],
    filter: Option<ExprId>,
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let mut out = Vec::new();
    comp_recurse(arena, clauses, 0, env, ctx, &mut |env| {
        if let Some(filter) = filter {
            let condition = force(evaluate(arena, filter, env, ctx)?, ctx)?;
            let Value::Bool(keep) = condition else {
                return Err(type_mismatch(
                    "bool",
                    condition.type_name().to_string(),
                    Some("comprehension filter"),
                )
                .at(arena.span(filter)));
            };
            if !keep {
                return Ok(());
            }
        }
        out.push(evaluate(arena, body, env, ctx)?);
        Ok(())
    })?;
    Ok(Value::array(out))
}

fn eval_object_comp(
    arena: &SharedArena,
    key_expr: ExprId,
    value_expr: ExprId,
    clauses: &[ForClause],
    filter: Option<ExprId>,
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let mut out = Vec::new();
    comp_recurse(arena, clauses, 0, env, ctx, &mut |env| {
        if let Some(filter) = filter {
            let condition = force(evaluate(arena, filter, env, ctx)?, ctx)?;
            let Value::Bool(keep) = condition else {
                return Err(type_mismatch(
                    "bool",
                    condition.type_name().to_string(),
                    Some("comprehension filter"),
                )
                .at(arena.span(filter)));
            };
            if !keep {
                return Ok(());
            }
        }
        let key = force(evaluate(arena, key_expr, env, ctx)?, ctx)?;
        let key_name: Rc<str> = match key {
            Value::Str(s) => Rc::from(s.as_str()),
            Value::Symbol(name) => Rc::from(ctx.interner.resolve(name)),
            Value::Int(i) => Rc::from(i.raw().to_string().as_str()),
            other => {
                return Err(type_mismatch(
                    "string, symbol, or int",
                    other.type_name().to_string(),
                    Some("object comprehension key"),
                )
                .at(arena.span(key_expr)))
            }
        };
        let value = evaluate(arena, value_expr, env, ctx)?;
        out.push(ValueField { name: key_name, value, is_patch: false });
        Ok(())
    })?;
    Ok(Value::object(ObjectValue { fields: out, doc: None }))
}

fn comp_recurse(
    arena: &SharedArena,
    clauses: &[ForClause],
    index: usize,
    env: &Environment,
    ctx: &EvalContext,
    leaf: &mut dyn FnMut(&Environment) -> Result<(), EvalError>,
) -> Result<(), EvalError> {
    let Some(clause) = clauses.get(index) else {
        return leaf(env);
    };
    let iterable = force(evaluate(arena, clause.iterable, env, ctx)?, ctx)?;
    let items = iterate_value(iterable, ctx).map_err(|err| err.at(clause.span))?;
    let pattern = arena.pattern(clause.pattern);
    for item in items {
        let extended = match_pattern(pattern, item, env, ctx)?;
        comp_recurse(arena, clauses, index + 1, &extended, ctx, leaf)?;
    }
    Ok(())
}

fn eval_field_projection(
    arena: &SharedArena,
    span: Span,
    object: ExprId,
    names: &[Name],
    env: &Environment,
    ctx: &EvalContext,
) -> EvalResult {
    let obj = force(evaluate(arena, object, env, ctx)?, ctx)?;
    let Value::Object(source) = obj else {
        return Err(type_mismatch("object", obj.type_name().to_string(), Some("field projection")).at(span));
    };
    let mut fields = Vec::with_capacity(names.len());
    for name in names {
        let name_str = ctx.interner.resolve(*name);
        match source.get(name_str) {
            Some(field) => fields.push(field.clone()),
            None => return Err(unknown_field(name_str, available_names(&source)).at(span)),
        }
    }
    Ok(Value::object(ObjectValue { fields, doc: None }))
}
