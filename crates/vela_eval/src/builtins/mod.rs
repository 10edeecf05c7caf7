//! Native-function registry and stdlib module construction (spec.md §6).
//!
//! Each stdlib module is built here as a plain `ObjectValue` whose fields
//! are `Value::Native` entries, rather than parsed from `.vela` source —
//! a scope decision recorded in DESIGN.md. `module::root_bindings` installs
//! the result at the root of every evaluation environment.

mod array;
mod json;
mod math;
mod object;
mod predicates;
mod range;
mod result;
mod string;
mod support;
mod symbol;
mod tuple;
mod yaml;

use std::rc::Rc;

use vela_values::{user_crash, EvalResult, NativeContext, NativeFn, ObjectValue, Value, ValueField};

use crate::context::EvalContext;

fn module(ctx: &EvalContext, entries: &[(&str, NativeFn)]) -> Value {
    let fields = entries
        .iter()
        .map(|(name, func)| ValueField {
            name: Rc::from(*name),
            value: Value::Native(ctx.interner.intern(name), *func),
            is_patch: false,
        })
        .collect();
    Value::object(ObjectValue { fields, doc: None })
}

fn crash(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let message = support::expect_str(arg, "crash")?;
    ctx.crash(message.to_string());
    Err(user_crash(message.to_string()))
}

fn identity(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(arg.clone())
}

/// Builds the stdlib modules auto-imported into every evaluation root
/// environment (spec.md §4.7). `Basics`'s fields are additionally bound
/// unqualified by the caller.
pub fn stdlib_modules(ctx: &EvalContext) -> Vec<(&'static str, Value)> {
    vec![
        (
            "Array",
            module(
                ctx,
                &[
                    ("length", array::length),
                    ("get", array::get),
                    ("reverse", array::reverse),
                    ("fold", array::fold),
                    ("slice", array::slice),
                    ("sort", array::sort),
                    ("uniq", array::uniq),
                    ("concatAll", array::concat_all),
                ],
            ),
        ),
        (
            "String",
            module(
                ctx,
                &[
                    ("length", string::length),
                    ("concat", string::concat),
                    ("split", string::split),
                    ("upper", string::upper),
                    ("lower", string::lower),
                    ("chars", string::chars),
                    ("trim", string::trim),
                    ("startsWith", string::starts_with),
                    ("endsWith", string::ends_with),
                    ("contains", string::contains),
                    ("repeat", string::repeat),
                    ("replace", string::replace),
                    ("slice", string::slice),
                    ("join", string::join),
                ],
            ),
        ),
        (
            "Math",
            module(
                ctx,
                &[
                    ("min", math::min),
                    ("max", math::max),
                    ("abs", math::abs),
                    ("pow", math::pow),
                    ("sqrt", math::sqrt),
                    ("floor", math::floor),
                    ("ceil", math::ceil),
                    ("round", math::round),
                    ("log", math::log),
                    ("exp", math::exp),
                    ("mod", math::modulo),
                    ("rem", math::rem),
                ],
            ),
        ),
        (
            "Float",
            module(
                ctx,
                &[
                    ("round", math::float::round),
                    ("floor", math::float::floor),
                    ("ceil", math::float::ceil),
                    ("abs", math::float::abs),
                    ("sqrt", math::float::sqrt),
                    ("pow", math::float::pow),
                    ("toInt", math::float::to_int),
                    ("fromInt", math::float::from_int),
                ],
            ),
        ),
        (
            "Object",
            module(
                ctx,
                &[
                    ("keys", object::keys),
                    ("values", object::values),
                    ("entries", object::entries),
                    ("get", object::get),
                    ("has", object::has),
                    ("length", object::length),
                    ("fromEntries", object::from_entries),
                ],
            ),
        ),
        ("Json", module(ctx, &[("parse", json::parse), ("encode", json::encode)])),
        ("Yaml", module(ctx, &[("parse", yaml::parse), ("encode", yaml::encode)])),
        ("Range", module(ctx, &[("toArray", range::to_array), ("contains", range::contains)])),
        (
            "Result",
            module(
                ctx,
                &[
                    ("isOk", result::is_ok),
                    ("isError", result::is_error),
                    ("map", result::map),
                    ("unwrapOr", result::unwrap_or),
                ],
            ),
        ),
        ("Tuple", module(ctx, &[("first", tuple::first), ("second", tuple::second), ("toArray", tuple::to_array)])),
        ("Symbol", module(ctx, &[("toString", symbol::to_string_)])),
        (
            "Basics",
            module(
                ctx,
                &[
                    ("isInt", predicates::is_int),
                    ("isFloat", predicates::is_float),
                    ("isBool", predicates::is_bool),
                    ("isNull", predicates::is_null),
                    ("isString", predicates::is_string),
                    ("isArray", predicates::is_array),
                    ("isObject", predicates::is_object),
                    ("isFunction", predicates::is_function),
                    ("isSymbol", predicates::is_symbol),
                    ("typeOf", predicates::type_of),
                    ("crash", crash),
                    ("identity", identity),
                ],
            ),
        ),
    ]
}
