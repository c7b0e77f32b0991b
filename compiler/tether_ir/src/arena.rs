//! Flat storage for expressions.

use std::fmt;
use std::sync::Arc;

use crate::{Expr, ExprId, ExprRange, Name, NameRange};

/// Arena holding every expression of a program.
///
/// Expressions are appended while building; the arena is then frozen into a
/// [`SharedArena`] and never mutated again.
#[derive(Clone, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    params: Vec<Name>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression, returning its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` expressions.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// Append a list of expression ids, returning its range.
    pub fn alloc_list(&mut self, ids: &[ExprId]) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list entries");
        self.expr_lists.extend_from_slice(ids);
        ExprRange {
            start,
            len: to_u32(ids.len(), "list length"),
        }
    }

    /// Append a list of parameter names, returning its range.
    pub fn alloc_params(&mut self, names: &[Name]) -> NameRange {
        let start = to_u32(self.params.len(), "parameters");
        self.params.extend_from_slice(names);
        NameRange {
            start,
            len: to_u32(names.len(), "parameter count"),
        }
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` came from a different arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn get_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    #[inline]
    pub fn get_params(&self, range: NameRange) -> &[Name] {
        let start = range.start as usize;
        &self.params[start..start + range.len()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("params", &self.params.len())
            .finish()
    }
}

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: too many {what}"))
}

/// Frozen, shareable arena.
///
/// Closures keep a handle to the arena their code lives in, so a closure
/// stays callable after the program that created it has finished running.
#[derive(Clone, Debug)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether two handles refer to the same frozen arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
