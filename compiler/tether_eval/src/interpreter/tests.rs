#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;
use tether_ir::{AstBuilder, BinaryOp};

struct Run {
    result: EvalResult,
    lines: Vec<String>,
    interp: Interpreter,
}

fn run_with_depth(max_depth: usize, build: impl FnOnce(&mut AstBuilder) -> ExprId) -> Run {
    let interner = SharedInterner::default();
    let mut b = AstBuilder::new(&interner);
    let root = build(&mut b);
    let arena = b.finish();
    let mut interp = InterpreterBuilder::new(&interner, &arena)
        .print_handler(buffer_handler())
        .max_call_depth(max_depth)
        .build();
    let result = interp.eval(root);
    let lines = interp.print_handler().lines();
    Run {
        result,
        lines,
        interp,
    }
}

fn run(build: impl FnOnce(&mut AstBuilder) -> ExprId) -> Run {
    run_with_depth(DEFAULT_MAX_CALL_DEPTH, build)
}

fn error_kind(run: &Run) -> EvalErrorKind {
    run.result.clone().unwrap_err().kind
}

// Expressions

#[test]
fn arithmetic_follows_tree_shape() {
    let r = run(|b| {
        let one = b.number(1.0);
        let two = b.number(2.0);
        let three = b.number(3.0);
        let product = b.binary(BinaryOp::Mul, two, three);
        b.binary(BinaryOp::Add, one, product)
    });
    assert_eq!(r.result, Ok(Value::number(7.0)));
}

#[test]
fn string_plus_number_concatenates() {
    let r = run(|b| {
        let label = b.string("Before: ");
        let ten = b.number(10.0);
        b.binary(BinaryOp::Add, label, ten)
    });
    assert_eq!(r.result, Ok(Value::string("Before: 10")));
}

#[test]
fn print_joins_arguments_with_space() {
    let r = run(|b| {
        let label = b.string("Before:");
        let ten = b.number(10.0);
        let flag = b.bool(true);
        b.print(&[label, ten, flag])
    });
    assert_eq!(r.result, Ok(Value::Void));
    assert_eq!(r.lines, vec!["Before: 10 true"]);
}

#[test]
fn print_shows_function_name() {
    let r = run(|b| {
        let body = b.void();
        let f = b.named_function("test", &[], body);
        b.print(&[f])
    });
    assert_eq!(r.lines, vec!["<function test>"]);
}

// Bindings and blocks

#[test]
fn let_then_read() {
    let r = run(|b| {
        let ten = b.number(10.0);
        let def = b.let_("a", ten);
        let read = b.ident("a");
        b.block(&[def, read])
    });
    assert_eq!(r.result, Ok(Value::number(10.0)));
}

#[test]
fn inner_block_shadows_without_touching_outer() {
    let r = run(|b| {
        let one = b.number(1.0);
        let outer = b.let_("x", one);
        let two = b.number(2.0);
        let inner = b.let_("x", two);
        let read_inner = b.ident("x");
        let show_inner = b.print(&[read_inner]);
        let nested = b.block(&[inner, show_inner]);
        let read_outer = b.ident("x");
        let show_outer = b.print(&[read_outer]);
        b.block(&[outer, nested, show_outer])
    });
    assert_eq!(r.result, Ok(Value::Void));
    assert_eq!(r.lines, vec!["2", "1"]);
}

#[test]
fn block_locals_do_not_leak() {
    let r = run(|b| {
        let one = b.number(1.0);
        let def = b.let_("y", one);
        let nested = b.block(&[def]);
        let read = b.ident("y");
        b.block(&[nested, read])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::UnboundName {
            name: "y".to_string()
        }
    );
}

#[test]
fn assignment_in_inner_block_updates_owner() {
    let r = run(|b| {
        let one = b.number(1.0);
        let def = b.let_("x", one);
        let five = b.number(5.0);
        let write = b.assign("x", five);
        let nested = b.block(&[write]);
        let read = b.ident("x");
        b.block(&[def, nested, read])
    });
    assert_eq!(r.result, Ok(Value::number(5.0)));
}

#[test]
fn duplicate_let_in_one_block_fails() {
    let r = run(|b| {
        let one = b.number(1.0);
        let first = b.let_("a", one);
        let two = b.number(2.0);
        let second = b.let_("a", two);
        b.block(&[first, second])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::DuplicateBinding {
            name: "a".to_string()
        }
    );
}

#[test]
fn assignment_to_unbound_name_fails() {
    let r = run(|b| {
        let one = b.number(1.0);
        let write = b.assign("nope", one);
        b.block(&[write])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::UnboundName {
            name: "nope".to_string()
        }
    );
}

#[test]
fn compound_assignment_updates_in_place() {
    let r = run(|b| {
        let one = b.number(1.0);
        let def = b.let_("a", one);
        let two = b.number(2.0);
        let add = b.compound_assign(BinaryOp::Add, "a", two);
        let read = b.ident("a");
        b.block(&[def, add, read])
    });
    assert_eq!(r.result, Ok(Value::number(3.0)));
}

#[test]
fn compound_assignment_type_mismatch_keeps_old_value() {
    let r = run(|b| {
        let flag = b.bool(true);
        let def = b.let_("a", flag);
        let one = b.number(1.0);
        let sub = b.compound_assign(BinaryOp::Sub, "a", one);
        b.block(&[def, sub])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::BinaryTypeMismatch {
            op: "-",
            left: "bool".to_string(),
            right: "number".to_string()
        }
    );
}

#[test]
fn error_inside_block_restores_frame() {
    let r = run(|b| {
        let read = b.ident("missing");
        let nested = b.block(&[read]);
        b.block(&[nested])
    });
    assert!(r.result.is_err());
    assert!(r.interp.current_frame().ptr_eq(r.interp.global()));
}

// Control flow

#[test]
fn if_uses_truthiness() {
    let r = run(|b| {
        let zero = b.number(0.0);
        let yes = b.string("yes");
        let no = b.string("no");
        b.if_(zero, yes, Some(no))
    });
    assert_eq!(r.result, Ok(Value::string("no")));

    let r = run(|b| {
        let empty = b.string("");
        let yes = b.string("yes");
        b.if_(empty, yes, None)
    });
    assert_eq!(r.result, Ok(Value::Void));
}

#[test]
fn return_leaves_function_early() {
    let r = run(|b| {
        let x = b.ident("x");
        let zero = b.number(0.0);
        let positive = b.binary(BinaryOp::Gt, x, zero);
        let pos = b.string("pos");
        let ret_pos = b.ret(Some(pos));
        let branch = b.if_(positive, ret_pos, None);
        let neg = b.string("neg");
        let body = b.block(&[branch, neg]);
        let f = b.function(&["x"], body);
        let def = b.let_("sign", f);

        let callee = b.ident("sign");
        let one = b.number(1.0);
        let call_pos = b.call(callee, &[one]);
        let callee = b.ident("sign");
        let minus_one = b.number(-1.0);
        let call_neg = b.call(callee, &[minus_one]);
        let show = b.print(&[call_pos, call_neg]);
        b.block(&[def, show])
    });
    assert_eq!(r.lines, vec!["pos neg"]);
}

#[test]
fn top_level_return_ends_program() {
    let r = run(|b| {
        let three = b.number(3.0);
        let ret = b.ret(Some(three));
        let one = b.number(1.0);
        let show = b.print(&[one]);
        b.block(&[ret, show])
    });
    assert_eq!(r.result, Ok(Value::number(3.0)));
    assert!(r.lines.is_empty());
}

#[test]
fn recursive_factorial() {
    let r = run(|b| {
        let n = b.ident("n");
        let one = b.number(1.0);
        let base = b.binary(BinaryOp::LtEq, n, one);
        let one = b.number(1.0);
        let ret_one = b.ret(Some(one));
        let check = b.if_(base, ret_one, None);
        let n = b.ident("n");
        let fact = b.ident("fact");
        let n2 = b.ident("n");
        let one = b.number(1.0);
        let pred = b.binary(BinaryOp::Sub, n2, one);
        let rec = b.call(fact, &[pred]);
        let product = b.binary(BinaryOp::Mul, n, rec);
        let body = b.block(&[check, product]);
        let f = b.named_function("fact", &["n"], body);
        let def = b.let_("fact", f);

        let fact = b.ident("fact");
        let five = b.number(5.0);
        let call = b.call(fact, &[five]);
        b.block(&[def, call])
    });
    assert_eq!(r.result, Ok(Value::number(120.0)));
    assert_eq!(r.interp.call_depth(), 0);
}

// Calls

#[test]
fn calling_a_number_fails() {
    let r = run(|b| {
        let one = b.number(1.0);
        let def = b.let_("x", one);
        let callee = b.ident("x");
        let call = b.call(callee, &[]);
        b.block(&[def, call])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::NotCallable {
            type_name: "number".to_string()
        }
    );
}

#[test]
fn wrong_argument_count_fails() {
    let r = run(|b| {
        let body = b.void();
        let f = b.named_function("pair", &["a", "b"], body);
        let one = b.number(1.0);
        b.call(f, &[one])
    });
    assert_eq!(
        error_kind(&r),
        EvalErrorKind::ArityMismatch {
            name: "pair".to_string(),
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn unbounded_recursion_hits_depth_limit() {
    let r = run_with_depth(16, |b| {
        let me = b.ident("loop");
        let call = b.call(me, &[]);
        let f = b.named_function("loop", &[], call);
        let def = b.let_("loop", f);
        let me = b.ident("loop");
        let start = b.call(me, &[]);
        b.block(&[def, start])
    });
    let err = r.result.clone().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 16 });
    assert_eq!(err.backtrace.len(), 16);
    assert!(err.backtrace.iter().all(|name| name == "loop"));
    assert_eq!(r.interp.call_depth(), 0);
    assert!(r.interp.current_frame().ptr_eq(r.interp.global()));
}

#[test]
fn backtrace_lists_innermost_call_first() {
    let r = run(|b| {
        let missing = b.ident("missing");
        let inner = b.named_function("inner", &[], missing);
        let def_inner = b.let_("inner", inner);
        let callee = b.ident("inner");
        let call_inner = b.call(callee, &[]);
        let outer = b.named_function("outer", &[], call_inner);
        let def_outer = b.let_("outer", outer);
        let callee = b.ident("outer");
        let call_outer = b.call(callee, &[]);
        b.block(&[def_inner, def_outer, call_outer])
    });
    let err = r.result.unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundName {
            name: "missing".to_string()
        }
    );
    assert_eq!(err.backtrace, vec!["inner", "outer"]);
}

#[test]
fn host_can_invoke_returned_closure() {
    let mut r = run(|b| {
        let x = b.ident("x");
        let two = b.number(2.0);
        let doubled = b.binary(BinaryOp::Mul, x, two);
        b.function(&["x"], doubled)
    });
    let f = r.result.clone().unwrap();
    assert_eq!(
        r.interp.invoke(&f, vec![Value::number(21.0)]),
        Ok(Value::number(42.0))
    );
    assert_eq!(
        r.interp.invoke(&Value::Bool(true), vec![]).unwrap_err().kind,
        EvalErrorKind::NotCallable {
            type_name: "bool".to_string()
        }
    );
}

#[test]
fn function_literal_captures_current_frame() {
    let r = run(|b| {
        let body = b.void();
        let f = b.function(&[], body);
        let def = b.let_("f", f);
        let read = b.ident("f");
        b.block(&[def, read])
    });
    let value = r.result.unwrap();
    let closure = value.as_closure().unwrap();
    // Root block frame, one level under global
    assert_eq!(closure.captured_frame().depth(), 1);
    assert!(closure
        .captured_frame()
        .parent()
        .is_some_and(|p| p.ptr_eq(r.interp.global())));
}
