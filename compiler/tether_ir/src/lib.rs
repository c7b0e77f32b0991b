//! Tether IR - identifiers and expression trees for the Tether evaluator.
//!
//! This crate contains the data the evaluator walks:
//! - Names for interned identifiers
//! - A thread-safe string interner
//! - Expression nodes stored flat in an arena
//! - A builder for constructing programs without a parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Freeze Before Sharing**: a finished arena becomes a `SharedArena` so
//!   closures can hold on to their code after the builder is gone

mod arena;
mod ast;
mod builder;
mod interner;
mod name;

pub use arena::{ExprArena, SharedArena};
pub use ast::{BinaryOp, Expr, ExprId, ExprRange, FunctionDef, NameRange};
pub use builder::AstBuilder;
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
