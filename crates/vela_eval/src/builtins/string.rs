//! `String` stdlib module (spec.md §6).

use vela_values::{invalid_argument, EvalResult, NativeContext, Value};

use super::support::{expect_array, expect_int, expect_str, sentinel, tuple_args};

pub fn length(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let s = expect_str(arg, "String.length")?;
    Ok(Value::int(s.chars().count() as i64))
}

pub fn concat(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let a = expect_str(&args[0], "String.concat")?;
    let b = expect_str(&args[1], "String.concat")?;
    Ok(Value::string(format!("{a}{b}")))
}

pub fn split(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let s = expect_str(&args[0], "String.split")?;
    let sep = expect_str(&args[1], "String.split")?;
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        s.split(&*sep).map(Value::string).collect()
    };
    Ok(Value::array(parts))
}

pub fn upper(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::string(expect_str(arg, "String.upper")?.to_uppercase()))
}

pub fn lower(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::string(expect_str(arg, "String.lower")?.to_lowercase()))
}

pub fn chars(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let s = expect_str(arg, "String.chars")?;
    Ok(Value::array(s.chars().map(|c| Value::string(c.to_string())).collect()))
}

pub fn trim(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::string(expect_str(arg, "String.trim")?.trim().to_string()))
}

pub fn starts_with(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let s = expect_str(&args[0], "String.startsWith")?;
    let prefix = expect_str(&args[1], "String.startsWith")?;
    Ok(Value::Bool(s.starts_with(&*prefix)))
}

pub fn ends_with(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let s = expect_str(&args[0], "String.endsWith")?;
    let suffix = expect_str(&args[1], "String.endsWith")?;
    Ok(Value::Bool(s.ends_with(&*suffix)))
}

pub fn contains(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let s = expect_str(&args[0], "String.contains")?;
    let needle = expect_str(&args[1], "String.contains")?;
    Ok(Value::Bool(s.contains(&*needle)))
}

pub fn repeat(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let s = expect_str(&args[0], "String.repeat")?;
    let count = expect_int(&args[1], "String.repeat")?;
    if count < 0 {
        return Err(invalid_argument("String.repeat count must be non-negative"));
    }
    Ok(Value::string(s.repeat(count as usize)))
}

pub fn replace(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 3)?;
    let s = expect_str(&args[0], "String.replace")?;
    let from = expect_str(&args[1], "String.replace")?;
    let to = expect_str(&args[2], "String.replace")?;
    Ok(Value::string(s.replace(&*from, &to)))
}

pub fn slice(ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 3)?;
    let s = expect_str(&args[0], "String.slice")?;
    let chars: Vec<char> = s.chars().collect();
    let start = expect_int(&args[1], "String.slice")?;
    let end = expect_int(&args[2], "String.slice")?;
    if start < 0 || end < 0 || start as usize > chars.len() || end as usize > chars.len() {
        return Ok(sentinel(ctx, "outOfBounds"));
    }
    let (start, end) = (start as usize, end as usize);
    if start > end {
        return Ok(Value::string(""));
    }
    Ok(Value::string(chars[start..end].iter().collect::<String>()))
}

pub fn join(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let parts = expect_array(&args[0], "String.join")?;
    let sep = expect_str(&args[1], "String.join")?;
    let mut strings = Vec::with_capacity(parts.len());
    for part in &parts {
        strings.push(expect_str(part, "String.join")?.to_string());
    }
    Ok(Value::string(strings.join(&sep)))
}

