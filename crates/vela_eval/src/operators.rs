//! Binary and unary operator evaluation (spec.md §4.3).
//!
//! Grounded in the teacher's `ori_eval::operators`/`unary_operators`:
//! direct enum-based dispatch over a fixed type set, since this language
//! (unlike the teacher's) has no user-extensible operator overloading.

use vela_values::{division_by_zero, overflow, type_mismatch, Value};
use vela_ir::{BinaryOp, UnaryOp};

use crate::context::EvalContext;
use crate::force::force;

type OpResult = Result<Value, vela_values::EvalError>;

/// Deep structural equality, forcing both operands (and, recursively,
/// every element/field) first. Functions and natives always compare
/// unequal. Objects compare by permutation-insensitive key/value equality
/// (spec.md §4.3, §9 open question 2).
pub fn values_equal(a: Value, b: Value, ctx: &EvalContext) -> Result<bool, vela_values::EvalError> {
    let a = force(a, ctx)?;
    let b = force(b, ctx)?;
    match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Float(x), Value::Float(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Null, Value::Null) => Ok(true),
        (Value::Symbol(x), Value::Symbol(y)) => Ok(x == y),
        (Value::Str(x), Value::Str(y)) => Ok(**x == **y),
        (Value::Range(x), Value::Range(y)) => Ok(x == y),
        (Value::Array(x), Value::Array(y)) | (Value::Tuple(x), Value::Tuple(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (xi, yi) in x.iter().zip(y.iter()) {
                if !values_equal(xi.clone(), yi.clone(), ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.fields.len() != y.fields.len() {
                return Ok(false);
            }
            for field in &x.fields {
                match y.get(&field.name) {
                    Some(other_field) => {
                        if !values_equal(field.value.clone(), other_field.value.clone(), ctx)? {
                            return Ok(false);
                        }
                    }
                    None => return Ok(false),
                }
            }
            Ok(true)
        }
        (Value::Function(_) | Value::Native(..) | Value::Partial(_), _)
        | (_, Value::Function(_) | Value::Native(..) | Value::Partial(_)) => Ok(false),
        _ => Ok(false),
    }
}

/// Evaluates a binary operator on already-forced operands, excluding
/// `&&`/`||` (short-circuit), `\` (pipeline, needs function application)
/// and `&` (object merge, needs the merger) — the caller in `eval.rs`
/// handles those three before falling through here.
pub fn evaluate_binary(left: Value, op: BinaryOp, right: Value, ctx: &EvalContext) -> OpResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(values_equal(left, right, ctx)?)),
        BinaryOp::Neq => return Ok(Value::Bool(!values_equal(left, right, ctx)?)),
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int(*a, op, *b),
        (Value::Float(_), Value::Float(_))
        | (Value::Int(_), Value::Float(_))
        | (Value::Float(_), Value::Int(_)) => {
            let a = as_f64(&left);
            let b = as_f64(&right);
            eval_float(a, op, b)
        }
        (Value::Bool(a), Value::Bool(b)) => eval_bool(*a, op, *b),
        (Value::Str(a), Value::Str(b)) => eval_string(a, op, b),
        _ => Err(type_mismatch(
            "matching operand types",
            format!("{} and {}", left.type_name(), right.type_name()),
            Some("binary operator"),
        )),
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Float(f) => *f,
        Value::Int(i) => i.raw() as f64,
        _ => unreachable!("caller only passes numeric values"),
    }
}

fn eval_int(a: vela_values::ScalarInt, op: BinaryOp, b: vela_values::ScalarInt) -> OpResult {
    match op {
        BinaryOp::Add => a.checked_add(b).map(Value::Int).ok_or_else(|| overflow("addition")),
        BinaryOp::Sub => a.checked_sub(b).map(Value::Int).ok_or_else(|| overflow("subtraction")),
        BinaryOp::Mul => a.checked_mul(b).map(Value::Int).ok_or_else(|| overflow("multiplication")),
        BinaryOp::Div => {
            if b.is_zero() {
                Err(division_by_zero())
            } else {
                a.checked_div(b).map(Value::Int).ok_or_else(|| overflow("division"))
            }
        }
        BinaryOp::Lt => Ok(Value::Bool(a.raw() < b.raw())),
        BinaryOp::Le => Ok(Value::Bool(a.raw() <= b.raw())),
        BinaryOp::Gt => Ok(Value::Bool(a.raw() > b.raw())),
        BinaryOp::Ge => Ok(Value::Bool(a.raw() >= b.raw())),
        _ => Err(type_mismatch("a valid integer operator", format!("{op}"), None)),
    }
}

fn eval_float(a: f64, op: BinaryOp, b: f64) -> OpResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Le => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Ge => Ok(Value::Bool(a >= b)),
        _ => Err(type_mismatch("a valid numeric operator", format!("{op}"), None)),
    }
}

fn eval_bool(a: bool, op: BinaryOp, b: bool) -> OpResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        _ => Err(type_mismatch("a valid boolean operator", format!("{op}"), None)),
    }
}

fn eval_string(a: &vela_values::Heap<String>, op: BinaryOp, b: &vela_values::Heap<String>) -> OpResult {
    let (a, b) = (a.as_str(), b.as_str());
    match op {
        BinaryOp::Add => Ok(Value::string(format!("{a}{b}"))),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Le => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Ge => Ok(Value::Bool(a >= b)),
        _ => Err(type_mismatch("a valid string operator", format!("{op}"), None)),
    }
}

/// Evaluates a unary operator. The language only has logical-not
/// (spec.md §3), unlike the teacher's richer set.
pub fn evaluate_unary(op: UnaryOp, value: Value) -> OpResult {
    match (op, &value) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(type_mismatch("bool", value.type_name().to_string(), Some("unary `!`"))),
    }
}
