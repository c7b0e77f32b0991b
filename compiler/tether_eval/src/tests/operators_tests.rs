//! Tests for binary operator evaluation.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use tether_ir::{AstBuilder, BinaryOp, Expr, SharedInterner};

use crate::closure::{ClosureValue, FunctionCode};
use crate::environment::FrameRef;
use crate::errors::EvalErrorKind;
use crate::operators::evaluate_binary;
use crate::value::Value;

fn num(n: f64) -> Value {
    Value::number(n)
}

fn closure() -> Value {
    let interner = SharedInterner::default();
    let mut b = AstBuilder::new(&interner);
    let body = b.void();
    let func = b.function(&[], body);
    let arena = b.finish();
    let Expr::Function(def) = *arena.get(func) else {
        panic!("expected function literal");
    };
    Value::Function(ClosureValue::make(
        FunctionCode::new(arena, def, None),
        FrameRef::root(),
    ))
}

#[test]
fn test_number_arithmetic() {
    assert_eq!(evaluate_binary(BinaryOp::Add, &num(2.0), &num(3.0)).unwrap(), num(5.0));
    assert_eq!(evaluate_binary(BinaryOp::Sub, &num(5.0), &num(3.0)).unwrap(), num(2.0));
    assert_eq!(evaluate_binary(BinaryOp::Mul, &num(2.0), &num(3.0)).unwrap(), num(6.0));
    assert_eq!(evaluate_binary(BinaryOp::Div, &num(7.0), &num(2.0)).unwrap(), num(3.5));
}

#[test]
fn test_division_by_zero_is_ieee() {
    let inf = evaluate_binary(BinaryOp::Div, &num(1.0), &num(0.0)).unwrap();
    assert_eq!(inf.to_string(), "Infinity");
    let neg_inf = evaluate_binary(BinaryOp::Div, &num(-1.0), &num(0.0)).unwrap();
    assert_eq!(neg_inf.to_string(), "-Infinity");
    let nan = evaluate_binary(BinaryOp::Div, &num(0.0), &num(0.0)).unwrap();
    assert_eq!(nan.to_string(), "NaN");
}

#[test]
fn test_string_concatenation() {
    let hello = Value::string("hello ");
    let world = Value::string("world");
    assert_eq!(
        evaluate_binary(BinaryOp::Add, &hello, &world).unwrap(),
        Value::string("hello world")
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Add, &Value::string("After: "), &num(20.0)).unwrap(),
        Value::string("After: 20")
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Add, &num(1.5), &Value::string("x")).unwrap(),
        Value::string("1.5x")
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Add, &Value::string("v="), &Value::Void).unwrap(),
        Value::string("v=void")
    );
}

#[test]
fn test_comparisons() {
    let t = Value::Bool(true);
    let f = Value::Bool(false);
    assert_eq!(evaluate_binary(BinaryOp::Lt, &num(1.0), &num(2.0)).unwrap(), t);
    assert_eq!(evaluate_binary(BinaryOp::LtEq, &num(2.0), &num(2.0)).unwrap(), t);
    assert_eq!(evaluate_binary(BinaryOp::Gt, &num(1.0), &num(2.0)).unwrap(), f);
    assert_eq!(evaluate_binary(BinaryOp::GtEq, &num(3.0), &num(2.0)).unwrap(), t);
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, &Value::string("abc"), &Value::string("abd")).unwrap(),
        t
    );
}

#[test]
fn test_nan_compares_false() {
    let nan = num(f64::NAN);
    for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
        assert_eq!(
            evaluate_binary(op, &nan, &num(1.0)).unwrap(),
            Value::Bool(false)
        );
    }
}

#[test]
fn test_equality_across_types() {
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &num(1.0), &num(1.0)).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &num(1.0), &Value::string("1")).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::NotEq, &Value::Void, &Value::Bool(false)).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_function_equality_is_identity() {
    let f = closure();
    let g = closure();
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &f, &f.clone()).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &f, &g).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_type_mismatch() {
    let err = evaluate_binary(BinaryOp::Sub, &Value::string("a"), &num(1.0)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::BinaryTypeMismatch {
            op: "-",
            left: "str".to_string(),
            right: "number".to_string()
        }
    );

    let err = evaluate_binary(BinaryOp::Add, &Value::Bool(true), &num(1.0)).unwrap_err();
    assert_eq!(err.to_string(), "cannot apply `+` to bool and number");

    assert!(evaluate_binary(BinaryOp::Lt, &num(1.0), &Value::string("2")).is_err());
    assert!(evaluate_binary(BinaryOp::Mul, &closure(), &num(2.0)).is_err());
}
