//! Whole-program tests for capture semantics and operators.

mod operators_tests;
