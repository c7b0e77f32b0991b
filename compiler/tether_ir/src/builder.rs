//! Fluent construction of expression trees.
//!
//! There is no parser; hosts and tests assemble programs with [`AstBuilder`]
//! and freeze the result with [`AstBuilder::finish`].
//!
//! ```text
//! let mut b = AstBuilder::new(&interner);
//! let ten = b.number(10.0);
//! let def = b.let_("a", ten);
//! let read = b.ident("a");
//! let show = b.print(&[read]);
//! let root = b.block(&[def, show]);
//! let arena = b.finish();
//! ```

use crate::{BinaryOp, Expr, ExprArena, ExprId, FunctionDef, Name, SharedArena, SharedInterner};

/// Builder over a fresh [`ExprArena`].
pub struct AstBuilder {
    arena: ExprArena,
    interner: SharedInterner,
}

impl AstBuilder {
    pub fn new(interner: &SharedInterner) -> Self {
        AstBuilder {
            arena: ExprArena::new(),
            interner: interner.clone(),
        }
    }

    /// Intern an identifier.
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn number(&mut self, value: f64) -> ExprId {
        self.arena.alloc(Expr::Number(value))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.arena.alloc(Expr::Bool(value))
    }

    pub fn string(&mut self, text: &str) -> ExprId {
        let name = self.name(text);
        self.arena.alloc(Expr::Str(name))
    }

    pub fn void(&mut self) -> ExprId {
        self.arena.alloc(Expr::Void)
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.arena.alloc(Expr::Ident(name))
    }

    pub fn let_(&mut self, name: &str, init: ExprId) -> ExprId {
        let name = self.name(name);
        self.arena.alloc(Expr::Let { name, init })
    }

    pub fn assign(&mut self, name: &str, value: ExprId) -> ExprId {
        let name = self.name(name);
        self.arena.alloc(Expr::Assign { name, value })
    }

    pub fn compound_assign(&mut self, op: BinaryOp, name: &str, value: ExprId) -> ExprId {
        let name = self.name(name);
        self.arena.alloc(Expr::CompoundAssign { op, name, value })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.arena.alloc(Expr::Binary { op, left, right })
    }

    /// Anonymous function literal.
    pub fn function(&mut self, params: &[&str], body: ExprId) -> ExprId {
        self.function_def(None, params, body)
    }

    /// Named function literal. The name is only used for display.
    pub fn named_function(&mut self, name: &str, params: &[&str], body: ExprId) -> ExprId {
        let name = self.name(name);
        self.function_def(Some(name), params, body)
    }

    fn function_def(&mut self, name: Option<Name>, params: &[&str], body: ExprId) -> ExprId {
        let params: Vec<Name> = params.iter().map(|p| self.name(p)).collect();
        let params = self.arena.alloc_params(&params);
        self.arena
            .alloc(Expr::Function(FunctionDef { name, params, body }))
    }

    pub fn call(&mut self, callee: ExprId, args: &[ExprId]) -> ExprId {
        let args = self.arena.alloc_list(args);
        self.arena.alloc(Expr::Call { callee, args })
    }

    pub fn print(&mut self, args: &[ExprId]) -> ExprId {
        let args = self.arena.alloc_list(args);
        self.arena.alloc(Expr::Print { args })
    }

    pub fn block(&mut self, stmts: &[ExprId]) -> ExprId {
        let stmts = self.arena.alloc_list(stmts);
        self.arena.alloc(Expr::Block { stmts })
    }

    pub fn if_(&mut self, cond: ExprId, then_branch: ExprId, else_branch: Option<ExprId>) -> ExprId {
        self.arena.alloc(Expr::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn ret(&mut self, value: Option<ExprId>) -> ExprId {
        self.arena.alloc(Expr::Return(value))
    }

    /// Read access to the arena under construction.
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Freeze the arena.
    pub fn finish(self) -> SharedArena {
        SharedArena::new(self.arena)
    }
}
