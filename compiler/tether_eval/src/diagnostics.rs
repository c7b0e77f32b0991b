//! Call tracking for the evaluator.
//!
//! `CallStack` records one `CallFrame` per active closure call. It enforces
//! the call-depth limit on `push()` and, when an error escapes a call,
//! snapshots the active calls into the error's backtrace.

use std::sync::Arc;

use crate::errors::{stack_overflow, EvalError};

/// One active closure call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function name; `None` for anonymous function literals.
    pub name: Option<Arc<str>>,
}

impl CallFrame {
    pub fn new(name: Option<Arc<str>>) -> Self {
        CallFrame { name }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// Live call stack of the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Names of the active calls, most recent first.
    pub fn capture(&self) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .map(|f| f.display_name().to_string())
            .collect()
    }

    /// Attach a backtrace to `err` unless an inner call already did.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if err.has_backtrace() || self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}
