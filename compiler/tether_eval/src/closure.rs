//! Closure values: function code paired with its defining frame.
//!
//! `ClosureValue::make` stores a handle to the frame that was current when
//! the function literal was evaluated. That handle is never reassigned, and
//! it is a reference, not a snapshot: the closure reads and writes the live
//! bindings of that frame.
//!
//! `ClosureValue::invoke` creates a fresh call frame per call, parented to
//! the captured frame, so parameters and locals start over every time while
//! captured variables carry over from call to call.

use std::fmt;
use std::sync::Arc;

use tether_ir::{ExprId, FunctionDef, Name, SharedArena, StringLookup};

use crate::environment::FrameRef;
use crate::errors::{wrong_function_args, EvalError, EvalResult};
use crate::value::Value;

/// The code half of a closure: a function literal and the arena it lives in.
pub struct FunctionCode {
    arena: SharedArena,
    def: FunctionDef,
    /// Resolved `def.name`, kept for display and backtraces.
    name: Option<Arc<str>>,
}

impl FunctionCode {
    pub fn new(arena: SharedArena, def: FunctionDef, name: Option<Arc<str>>) -> Self {
        FunctionCode { arena, def, name }
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn params(&self) -> &[Name] {
        self.arena.get_params(self.def.params)
    }

    pub fn body(&self) -> ExprId {
        self.def.body
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn shared_name(&self) -> Option<Arc<str>> {
        self.name.clone()
    }

    /// Name shown in arity errors and backtraces.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<anonymous>")
    }
}

/// Runs closure bodies on behalf of [`ClosureValue::invoke`].
///
/// The interpreter is the production implementation; the trait keeps the
/// capture and call-frame rules independent of how bodies are evaluated.
pub trait BodyEvaluator: StringLookup {
    /// Evaluate `closure`'s body with `call_frame` as the current scope.
    fn eval_body(&mut self, closure: &ClosureValue, call_frame: FrameRef) -> EvalResult;
}

/// A function value over its defining frame.
///
/// Cloning shares both the code and the captured frame. Equality is identity:
/// two closures are equal only if one is a clone of the other.
#[derive(Clone)]
pub struct ClosureValue {
    code: Arc<FunctionCode>,
    frame: FrameRef,
}

impl ClosureValue {
    /// Capture `defining_frame` by reference.
    pub fn make(code: FunctionCode, defining_frame: FrameRef) -> Self {
        tracing::debug!(
            function = code.display_name(),
            arity = code.params().len(),
            frame_depth = defining_frame.depth(),
            "closure created"
        );
        ClosureValue {
            code: Arc::new(code),
            frame: defining_frame,
        }
    }

    pub fn code(&self) -> &FunctionCode {
        &self.code
    }

    /// The frame this closure was created in.
    pub fn captured_frame(&self) -> &FrameRef {
        &self.frame
    }

    pub fn arity(&self) -> usize {
        self.code.params().len()
    }

    /// Whether both closures resolve free variables through the same frame.
    pub fn shares_frame(&self, other: &ClosureValue) -> bool {
        self.frame.ptr_eq(&other.frame)
    }

    /// Create the frame one call runs in, with parameters bound.
    ///
    /// The new frame's parent is the captured frame. Repeated parameter names
    /// surface as `DuplicateBinding`.
    pub fn bind_call_frame(
        &self,
        args: Vec<Value>,
        names: &(impl StringLookup + ?Sized),
    ) -> Result<FrameRef, EvalError> {
        let params = self.code.params();
        if params.len() != args.len() {
            return Err(wrong_function_args(
                self.code.display_name(),
                params.len(),
                args.len(),
            ));
        }

        let call_frame = FrameRef::child_of(&self.frame);
        for (&param, arg) in params.iter().zip(args) {
            call_frame
                .define(param, arg)
                .map_err(|e| EvalError::from_binding(e, names))?;
        }
        Ok(call_frame)
    }

    /// Call this closure: bind a fresh call frame and evaluate the body in it.
    pub fn invoke(&self, args: Vec<Value>, evaluator: &mut impl BodyEvaluator) -> EvalResult {
        let call_frame = self.bind_call_frame(args, &*evaluator)?;
        tracing::debug!(
            function = self.code.display_name(),
            frame_depth = call_frame.depth(),
            "closure invoked"
        );
        evaluator.eval_body(self, call_frame)
    }
}

impl PartialEq for ClosureValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.code, &other.code) && self.shares_frame(other)
    }
}

impl fmt::Display for ClosureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code.name() {
            Some(name) => write!(f, "<function {name}>"),
            None => f.write_str("<function>"),
        }
    }
}

impl fmt::Debug for ClosureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureValue")
            .field("name", &self.code.display_name())
            .field("arity", &self.arity())
            .field("frame", &self.frame)
            .finish()
    }
}
