//! `Array` stdlib module (spec.md §6).

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

use super::support::{expect_array, expect_int, ok, sentinel, tuple_args};

pub fn length(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let items = expect_array(arg, "Array.length")?;
    Ok(Value::int(items.len() as i64))
}

pub fn get(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let items = expect_array(&args[0], "Array.get")?;
    let index = expect_int(&args[1], "Array.get")?;
    if index < 0 || index as usize >= items.len() {
        return Ok(sentinel(ctx, "outOfBounds"));
    }
    Ok(ok(ctx, items[index as usize].clone()))
}

pub fn reverse(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let mut items = expect_array(arg, "Array.reverse")?;
    items.reverse();
    Ok(Value::array(items))
}

pub fn fold(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 3)?;
    let items = expect_array(&args[0], "Array.fold")?;
    let mut acc = args[1].clone();
    let func = args[2].clone();
    for item in items {
        acc = ctx.apply(func.clone(), Value::tuple(vec![acc, item]))?;
    }
    Ok(acc)
}

pub fn slice(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 3)?;
    let items = expect_array(&args[0], "Array.slice")?;
    let start = expect_int(&args[1], "Array.slice")?.clamp(0, items.len() as i64) as usize;
    let end = expect_int(&args[2], "Array.slice")?.clamp(0, items.len() as i64) as usize;
    if start > end {
        return Ok(Value::array(Vec::new()));
    }
    Ok(Value::array(items[start..end].to_vec()))
}

pub fn sort(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let mut items = expect_array(&args[0], "Array.sort")?;
    let comparator = args[1].clone();
    let mut sort_error = None;
    items.sort_by(|a, b| {
        if sort_error.is_some() {
            return std::cmp::Ordering::Equal;
        }
        match ctx.apply(comparator.clone(), Value::tuple(vec![a.clone(), b.clone()])) {
            Ok(Value::Int(n)) => n.raw().cmp(&0),
            Ok(_) => {
                sort_error = Some(invalid_argument("Array.sort comparator must return an int"));
                std::cmp::Ordering::Equal
            }
            Err(e) => {
                sort_error = Some(e);
                std::cmp::Ordering::Equal
            }
        }
    });
    if let Some(e) = sort_error {
        return Err(e);
    }
    Ok(Value::array(items))
}

pub fn uniq(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let items = expect_array(arg, "Array.uniq")?;
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.iter().any(|seen| *seen == item) {
            out.push(item);
        }
    }
    Ok(Value::array(out))
}

pub fn concat_all(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let outer = expect_array(arg, "Array.concatAll")?;
    let mut out = Vec::new();
    for inner in outer {
        out.extend(expect_array(&inner, "Array.concatAll")?);
    }
    Ok(Value::array(out))
}
