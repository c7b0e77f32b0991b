//! Expression nodes.
//!
//! Everything is an expression: statements such as `let` and `print`
//! evaluate to `void`. Child nodes are referenced by [`ExprId`], and
//! variable-length children (call arguments, block statements, parameters)
//! by ranges into side tables of the [`ExprArena`](crate::ExprArena).

use crate::Name;

/// Index of an expression in its arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Range of expression ids in the arena's list table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ExprRange {
    pub(crate) start: u32,
    pub(crate) len: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Range of names in the arena's parameter table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NameRange {
    pub(crate) start: u32,
    pub(crate) len: u32,
}

impl NameRange {
    pub const EMPTY: NameRange = NameRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// A function literal: the code half of a closure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDef {
    /// Optional name, used for display and backtraces only.
    pub name: Option<Name>,
    /// Parameter names, bound in the call frame in order.
    pub params: NameRange,
    /// Body; a `Block` body runs directly in the call frame.
    pub body: ExprId,
}

/// Expression node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// String literal (interned contents).
    Str(Name),
    /// The unit value.
    Void,
    /// Variable read.
    Ident(Name),
    /// `let name = init`: defines `name` in the current frame.
    Let { name: Name, init: ExprId },
    /// `name = value`: writes the binding in the frame that owns it.
    Assign { name: Name, value: ExprId },
    /// `name op= value`: read-modify-write of the owning binding.
    CompoundAssign {
        op: BinaryOp,
        name: Name,
        value: ExprId,
    },
    /// `left op right`.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Function literal; evaluating it captures the current frame.
    Function(FunctionDef),
    /// `callee(args...)`.
    Call { callee: ExprId, args: ExprRange },
    /// `print(args...)`: one line, arguments separated by a space.
    Print { args: ExprRange },
    /// `{ stmts... }`: runs in a fresh child frame, yields the last value.
    Block { stmts: ExprRange },
    /// `if cond { then } else { else }`.
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    /// `return` / `return value`.
    Return(Option<ExprId>),
}
