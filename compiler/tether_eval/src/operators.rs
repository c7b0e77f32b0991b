//! Binary operator evaluation.
//!
//! Arithmetic is IEEE `f64`: division by zero yields an infinity or NaN
//! rather than an error. `+` concatenates when either side is a string.

use std::cmp::Ordering;

use tether_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, EvalError};
use crate::value::Value;

/// Evaluate `left op right`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => eval_arithmetic(op, left, right),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_comparison(op, left, right)
        }
    }
}

fn eval_add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::string(format!("{left}{right}"))),
        _ => Err(mismatch(BinaryOp::Add, left, right)),
    }
}

fn eval_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(mismatch(op, left, right));
    };
    let result = match op {
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        _ => return Err(mismatch(op, left, right)),
    };
    Ok(Value::Number(result))
}

fn eval_comparison(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(op, left, right)),
    };
    // NaN compares false against everything
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(mismatch(op, left, right)),
    };
    Ok(Value::Bool(result))
}

#[cold]
fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    binary_type_mismatch(op.as_symbol(), left.type_name(), right.type_name())
}
