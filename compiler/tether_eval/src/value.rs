//! Runtime values.
//!
//! A closed set of variants. Numbers are `f64`; strings are immutable and
//! shared; functions are closures over their defining frame.

use std::fmt;
use std::num::FpCategory;
use std::sync::Arc;

use crate::closure::ClosureValue;

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Result of statements and of functions that return nothing.
    Void,
    Number(f64),
    Bool(bool),
    Str(Arc<str>),
    Function(ClosureValue),
}

impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Name of the variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness for `if`: `void`, `false`, zero, NaN and `""` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Void => false,
            Value::Number(n) => !matches!(n.classify(), FpCategory::Zero | FpCategory::Nan),
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&ClosureValue> {
        match self {
            Value::Function(c) => Some(c),
            _ => None,
        }
    }
}

/// Render a number the way `print` shows it.
///
/// Integral values have no fractional part, `-0` prints as `0`, and the
/// non-finite values use their conventional spellings.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match n.classify() {
        FpCategory::Nan => f.write_str("NaN"),
        FpCategory::Infinite if n.is_sign_positive() => f.write_str("Infinity"),
        FpCategory::Infinite => f.write_str("-Infinity"),
        FpCategory::Zero => f.write_str("0"),
        FpCategory::Normal | FpCategory::Subnormal => write!(f, "{n}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<ClosureValue> for Value {
    fn from(c: ClosureValue) -> Self {
        Value::Function(c)
    }
}
