//! Built-in demonstration programs.
//!
//! There is no parser, so each demo is a function that assembles its
//! expression tree with [`AstBuilder`]. Every demo exercises closures that
//! capture their defining frame by reference.

use tether_ir::{AstBuilder, BinaryOp, ExprId, SharedArena, SharedInterner};

/// A named program the CLI can run.
pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn(&mut AstBuilder) -> ExprId,
}

impl Demo {
    /// Build the program; returns its arena and root expression.
    pub fn program(&self, interner: &SharedInterner) -> (SharedArena, ExprId) {
        let mut b = AstBuilder::new(interner);
        let root = (self.build)(&mut b);
        (b.finish(), root)
    }
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "closures",
        summary: "closure created in a function, called there, returned and called again",
        build: closures,
    },
    Demo {
        name: "shared",
        summary: "two closures over one frame observing each other's writes",
        build: shared,
    },
    Demo {
        name: "counter",
        summary: "a counter factory; every call yields an independent counter",
        build: counter,
    },
];

pub fn find_demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

/// `print(label, name)`
fn show(b: &mut AstBuilder, label: &str, name: &str) -> ExprId {
    let label = b.string(label);
    let value = b.ident(name);
    b.print(&[label, value])
}

/// `name()`
fn call0(b: &mut AstBuilder, name: &str) -> ExprId {
    let callee = b.ident(name);
    b.call(callee, &[])
}

/// `name += amount`
fn bump(b: &mut AstBuilder, name: &str, amount: f64) -> ExprId {
    let amount = b.number(amount);
    b.compound_assign(BinaryOp::Add, name, amount)
}

/// ```text
/// function test() {
///     let a = 10
///     print("Outside before:", a)
///     let closure = function () {
///         print("Before:", a)
///         a += 10
///         print("After:", a)
///     }
///     closure()
///     print("Outside after:", a)
///     return closure
/// }
///
/// let c = test()
/// c()
/// c()
/// ```
fn closures(b: &mut AstBuilder) -> ExprId {
    let ten = b.number(10.0);
    let def_a = b.let_("a", ten);
    let outside_before = show(b, "Outside before:", "a");

    let before = show(b, "Before:", "a");
    let add = bump(b, "a", 10.0);
    let after = show(b, "After:", "a");
    let closure_body = b.block(&[before, add, after]);
    let closure = b.function(&[], closure_body);
    let def_closure = b.let_("closure", closure);

    let call = call0(b, "closure");
    let outside_after = show(b, "Outside after:", "a");
    let closure_ref = b.ident("closure");
    let ret = b.ret(Some(closure_ref));
    let test_body = b.block(&[
        def_a,
        outside_before,
        def_closure,
        call,
        outside_after,
        ret,
    ]);
    let test = b.named_function("test", &[], test_body);
    let def_test = b.let_("test", test);

    let made = call0(b, "test");
    let def_c = b.let_("c", made);
    let first = call0(b, "c");
    let second = call0(b, "c");
    b.block(&[def_test, def_c, first, second])
}

/// ```text
/// let a = 10
/// let left = function () { print("left sees", a); a += 1 }
/// let right = function () { print("right sees", a); a += 100 }
/// left(); right(); left()
/// print("a is now", a)
/// ```
fn shared(b: &mut AstBuilder) -> ExprId {
    let ten = b.number(10.0);
    let def_a = b.let_("a", ten);

    let seen = show(b, "left sees", "a");
    let add = bump(b, "a", 1.0);
    let body = b.block(&[seen, add]);
    let left = b.named_function("left", &[], body);
    let def_left = b.let_("left", left);

    let seen = show(b, "right sees", "a");
    let add = bump(b, "a", 100.0);
    let body = b.block(&[seen, add]);
    let right = b.named_function("right", &[], body);
    let def_right = b.let_("right", right);

    let first = call0(b, "left");
    let second = call0(b, "right");
    let third = call0(b, "left");
    let last = show(b, "a is now", "a");
    b.block(&[def_a, def_left, def_right, first, second, third, last])
}

/// ```text
/// let make_counter = function (start) {
///     let count = start
///     return function () { count += 1; return count }
/// }
/// let first = make_counter(0)
/// let second = make_counter(100)
/// print("first:", first(), first(), first())
/// print("second:", second(), second())
/// ```
fn counter(b: &mut AstBuilder) -> ExprId {
    let start = b.ident("start");
    let def_count = b.let_("count", start);
    let add = bump(b, "count", 1.0);
    let count = b.ident("count");
    let ret_count = b.ret(Some(count));
    let tick_body = b.block(&[add, ret_count]);
    let tick = b.named_function("tick", &[], tick_body);
    let ret_tick = b.ret(Some(tick));
    let make_body = b.block(&[def_count, ret_tick]);
    let make = b.named_function("make_counter", &["start"], make_body);
    let def_make = b.let_("make_counter", make);

    let factory = b.ident("make_counter");
    let zero = b.number(0.0);
    let made = b.call(factory, &[zero]);
    let def_first = b.let_("first", made);
    let factory = b.ident("make_counter");
    let hundred = b.number(100.0);
    let made = b.call(factory, &[hundred]);
    let def_second = b.let_("second", made);

    let label = b.string("first:");
    let f1 = call0(b, "first");
    let f2 = call0(b, "first");
    let f3 = call0(b, "first");
    let show_first = b.print(&[label, f1, f2, f3]);
    let label = b.string("second:");
    let s1 = call0(b, "second");
    let s2 = call0(b, "second");
    let show_second = b.print(&[label, s1, s2]);
    b.block(&[def_make, def_first, def_second, show_first, show_second])
}
