//! Error types for evaluation.
//!
//! `EvalErrorKind` is the structured category; factory functions below are
//! the way errors get built, so message wording lives in one place.
//!
//! None of these are recoverable at this layer. An error aborts the current
//! evaluation and propagates to whoever called `eval` or `invoke`.

use tether_ir::StringLookup;

use crate::environment::BindingError;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Binding
    /// Read or write of a name no frame in the chain defines.
    #[error("unbound name `{name}`")]
    UnboundName { name: String },
    /// Second `let` of a name within one frame.
    #[error("`{name}` is already defined in this scope")]
    DuplicateBinding { name: String },

    // Function
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("maximum call depth of {depth} exceeded")]
    StackOverflow { depth: usize },

    // Operators
    #[error("cannot apply `{op}` to {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
}

/// Evaluation error with the call stack active where it was raised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Function names, innermost call first. Empty for top-level errors.
    pub backtrace: Vec<String>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: Vec::new(),
        }
    }

    /// Convert a frame-level failure, resolving the name for display.
    pub fn from_binding(err: BindingError, names: &(impl StringLookup + ?Sized)) -> Self {
        match err {
            BindingError::Unbound(name) => unbound_name(names.lookup(name)),
            BindingError::Duplicate(name) => duplicate_binding(names.lookup(name)),
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<String>) -> Self {
        self.backtrace = backtrace;
        self
    }

    pub fn has_backtrace(&self) -> bool {
        !self.backtrace.is_empty()
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

#[cold]
pub fn unbound_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundName {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_binding(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateBinding {
        name: name.to_string(),
    })
}

/// Wrong number of arguments in a call to `name`.
#[cold]
pub fn wrong_function_args(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}
