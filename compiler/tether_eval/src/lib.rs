//! Tether Eval - environment frames, capturing closures and their evaluator.
//!
//! Closures in Tether capture their defining frame by reference. A frame is
//! reference counted and lives as long as any closure created in it, so a
//! local variable outlives the call that declared it and every closure over
//! that frame sees the others' writes.
//!
//! # Architecture
//!
//! - `FrameRef`: one lexical scope; bindings behind a per-frame lock, an
//!   immutable parent link for outward lookup
//! - `ClosureValue`: function code plus the frame it was created in
//! - `Interpreter`: walks a `tether_ir` expression tree, creating frames on
//!   scope entry and closures on function literals
//! - `PrintHandler`: the output side channel `print` writes to
//!
//! # Example
//!
//! ```text
//! let interner = SharedInterner::default();
//! let mut b = AstBuilder::new(&interner);
//! // ... build a program ...
//! let arena = b.finish();
//! let mut interp = InterpreterBuilder::new(&interner, &arena)
//!     .print_handler(buffer_handler())
//!     .build();
//! interp.eval(root)?;
//! ```

mod closure;
mod diagnostics;
mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod value;

#[cfg(test)]
mod tests;

pub use closure::{BodyEvaluator, ClosureValue, FunctionCode};
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{BindingError, FrameRef, WeakFrameRef};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::Value;
