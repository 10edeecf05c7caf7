//! `Math` and `Float` stdlib modules (spec.md §6).
//!
//! `Math` is numeric-tower generic (accepts int or float, preserving int
//! where the operation is exact); `Float` always takes and returns floats.

use vela_values::{invalid_argument, overflow, EvalResult, NativeContext, Value};

use super::support::{expect_int, tuple_args};

fn as_f64(value: &Value, what: &str) -> Result<f64, vela_values::EvalError> {
    match value {
        Value::Int(i) => Ok(i.raw() as f64),
        Value::Float(f) => Ok(*f),
        other => Err(invalid_argument(format!("expected a number for {what}, found {}", other.type_name()))),
    }
}

fn is_float(value: &Value) -> bool {
    matches!(value, Value::Float(_))
}

pub fn min(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let a = as_f64(&args[0], "Math.min")?;
    let b = as_f64(&args[1], "Math.min")?;
    let pick = if a <= b { &args[0] } else { &args[1] };
    Ok(pick.clone())
}

pub fn max(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    let a = as_f64(&args[0], "Math.max")?;
    let b = as_f64(&args[1], "Math.max")?;
    let pick = if a >= b { &args[0] } else { &args[1] };
    Ok(pick.clone())
}

pub fn abs(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    match arg {
        Value::Int(i) => Ok(Value::int(i.raw().abs())),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(invalid_argument(format!("expected a number for Math.abs, found {}", other.type_name()))),
    }
}

pub fn pow(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    if !is_float(&args[0]) && !is_float(&args[1]) {
        let base = expect_int(&args[0], "Math.pow")?;
        let exp = expect_int(&args[1], "Math.pow")?;
        if exp >= 0 {
            return base
                .checked_pow(exp as u32)
                .map(Value::int)
                .ok_or_else(|| overflow("Math.pow"));
        }
    }
    let base = as_f64(&args[0], "Math.pow")?;
    let exp = as_f64(&args[1], "Math.pow")?;
    Ok(Value::Float(base.powf(exp)))
}

pub fn sqrt(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Float(as_f64(arg, "Math.sqrt")?.sqrt()))
}

pub fn floor(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    match arg {
        Value::Int(_) => Ok(arg.clone()),
        _ => Ok(Value::int(as_f64(arg, "Math.floor")?.floor() as i64)),
    }
}

pub fn ceil(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    match arg {
        Value::Int(_) => Ok(arg.clone()),
        _ => Ok(Value::int(as_f64(arg, "Math.ceil")?.ceil() as i64)),
    }
}

pub fn round(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    match arg {
        Value::Int(_) => Ok(arg.clone()),
        _ => Ok(Value::int(as_f64(arg, "Math.round")?.round() as i64)),
    }
}

pub fn log(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Float(as_f64(arg, "Math.log")?.ln()))
}

pub fn exp(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    Ok(Value::Float(as_f64(arg, "Math.exp")?.exp()))
}

pub fn modulo(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    if !is_float(&args[0]) && !is_float(&args[1]) {
        let a = expect_int(&args[0], "Math.mod")?;
        let b = expect_int(&args[1], "Math.mod")?;
        if b == 0 {
            return Err(invalid_argument("Math.mod divisor must not be zero"));
        }
        return Ok(Value::int(a.rem_euclid(b)));
    }
    let a = as_f64(&args[0], "Math.mod")?;
    let b = as_f64(&args[1], "Math.mod")?;
    Ok(Value::Float(a.rem_euclid(b)))
}

/// Truncating remainder (sign follows the dividend), as distinct from
/// `mod`'s Euclidean remainder (sign always non-negative).
pub fn rem(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
    let args = tuple_args(arg, 2)?;
    if !is_float(&args[0]) && !is_float(&args[1]) {
        let a = expect_int(&args[0], "Math.rem")?;
        let b = expect_int(&args[1], "Math.rem")?;
        if b == 0 {
            return Err(invalid_argument("Math.rem divisor must not be zero"));
        }
        return Ok(Value::int(a % b));
    }
    let a = as_f64(&args[0], "Math.rem")?;
    let b = as_f64(&args[1], "Math.rem")?;
    Ok(Value::Float(a % b))
}

pub mod float {
    use super::*;

    pub fn round(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(as_f64(arg, "Float.round")?.round()))
    }

    pub fn floor(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(as_f64(arg, "Float.floor")?.floor()))
    }

    pub fn ceil(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(as_f64(arg, "Float.ceil")?.ceil()))
    }

    pub fn abs(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(as_f64(arg, "Float.abs")?.abs()))
    }

    pub fn sqrt(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(as_f64(arg, "Float.sqrt")?.sqrt()))
    }

    pub fn pow(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        let args = tuple_args(arg, 2)?;
        let base = as_f64(&args[0], "Float.pow")?;
        let exp = as_f64(&args[1], "Float.pow")?;
        Ok(Value::Float(base.powf(exp)))
    }

    pub fn to_int(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::int(as_f64(arg, "Float.toInt")?.trunc() as i64))
    }

    pub fn from_int(_ctx: &dyn NativeContext, arg: &Value) -> EvalResult {
        Ok(Value::Float(expect_int(arg, "Float.fromInt")? as f64))
    }
}
