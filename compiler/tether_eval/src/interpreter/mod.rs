//! Tree-walking interpreter for Tether.
//!
//! # Frames
//!
//! `frame` is the current scope. It changes in exactly two places:
//! - a `Block` runs in a fresh child of the current frame
//! - a closure body runs in the call frame built by `ClosureValue::invoke`,
//!   whose parent is the closure's captured frame, not the caller's frame
//!
//! Both swaps go through [`ScopedInterpreter`], which restores the previous
//! frame on drop. A function literal captures whatever `frame` is at the
//! moment it is evaluated.
//!
//! # Arena Threading
//!
//! Every closure carries the arena its body lives in. A call switches
//! `arena` to the callee's for the duration of the body, because an
//! `ExprId` is only meaningful in the arena that allocated it.

mod builder;
mod scope_guard;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use scope_guard::ScopedInterpreter;

use std::sync::Arc;

use tether_ir::{Expr, ExprId, ExprRange, Name, SharedArena, SharedInterner, StringLookup};

use crate::closure::{BodyEvaluator, ClosureValue, FunctionCode};
use crate::diagnostics::{CallFrame, CallStack};
use crate::environment::{BindingError, FrameRef};
use crate::errors::{not_callable, EvalError, EvalResult};
use crate::operators::evaluate_binary;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Non-local exit from expression evaluation.
pub(crate) enum Unwind {
    Error(EvalError),
    /// `return` unwinding to the nearest enclosing call.
    Return(Value),
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

type Flow = Result<Value, Unwind>;

/// Collapse an unwind at a call or program boundary.
fn settle(flow: Flow) -> EvalResult {
    match flow {
        Ok(value) | Err(Unwind::Return(value)) => Ok(value),
        Err(Unwind::Error(err)) => Err(err),
    }
}

/// Tree-walking interpreter.
pub struct Interpreter {
    interner: SharedInterner,
    /// Arena of the code currently executing.
    pub(crate) arena: SharedArena,
    /// Outermost frame; parentless.
    global: FrameRef,
    /// Current scope.
    pub(crate) frame: FrameRef,
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
}

impl Interpreter {
    /// Evaluate `root` in the current frame.
    ///
    /// A top-level `return` ends the program with its value.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn eval(&mut self, root: ExprId) -> EvalResult {
        settle(self.eval_expr(root))
    }

    /// Call a function value from the host.
    pub fn invoke(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        self.call_value(callee, args)
    }

    /// The outermost frame.
    pub fn global(&self) -> &FrameRef {
        &self.global
    }

    pub fn current_frame(&self) -> &FrameRef {
        &self.frame
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Active closure calls.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    fn eval_expr(&mut self, id: ExprId) -> Flow {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> Flow {
        let expr = *self.arena.get(id);
        match expr {
            Expr::Number(n) => Ok(Value::Number(n)),
            Expr::Bool(b) => Ok(Value::Bool(b)),
            Expr::Str(text) => Ok(Value::string(self.interner.lookup(text))),
            Expr::Void => Ok(Value::Void),
            Expr::Ident(name) => self.frame.get(name).map_err(|e| self.binding_error(e)),

            Expr::Let { name, init } => {
                let value = self.eval_expr(init)?;
                self.frame
                    .define(name, value)
                    .map_err(|e| self.binding_error(e))?;
                Ok(Value::Void)
            }
            Expr::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.frame
                    .set(name, value)
                    .map_err(|e| self.binding_error(e))?;
                Ok(Value::Void)
            }
            Expr::CompoundAssign { op, name, value } => {
                let rhs = self.eval_expr(value)?;
                self.frame
                    .update(name, |slot| {
                        *slot = evaluate_binary(op, slot, &rhs)?;
                        Ok::<(), EvalError>(())
                    })
                    .map_err(|e| self.binding_error(e))??;
                Ok(Value::Void)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(evaluate_binary(op, &left, &right)?)
            }

            Expr::Function(def) => {
                let name = def.name.map(|n| Arc::from(self.interner.lookup(n)));
                let code = FunctionCode::new(self.arena.clone(), def, name);
                Ok(Value::Function(ClosureValue::make(code, self.frame.clone())))
            }
            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = self.eval_args(args)?;
                Ok(self.call_value(&callee, args)?)
            }
            Expr::Print { args } => {
                let args = self.eval_args(args)?;
                let line = args
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.print_handler.println(&line);
                Ok(Value::Void)
            }

            Expr::Block { stmts } => {
                let arena = self.arena.clone();
                let child = FrameRef::child_of(&self.frame);
                let mut scoped = self.scoped_frame(child);
                scoped.eval_stmts(arena.get_list(stmts))
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.eval_expr(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_expr(else_branch)
                } else {
                    Ok(Value::Void)
                }
            }
            Expr::Return(value) => {
                let value = match value {
                    Some(value) => self.eval_expr(value)?,
                    None => Value::Void,
                };
                Err(Unwind::Return(value))
            }
        }
    }

    /// Evaluate statements in order in the current frame; yields the last.
    fn eval_stmts(&mut self, stmts: &[ExprId]) -> Flow {
        let mut last = Value::Void;
        for &stmt in stmts {
            last = self.eval_expr(stmt)?;
        }
        Ok(last)
    }

    fn eval_args(&mut self, args: ExprRange) -> Result<Vec<Value>, Unwind> {
        let arena = self.arena.clone();
        arena
            .get_list(args)
            .iter()
            .map(|&arg| self.eval_expr(arg))
            .collect()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(arity = args.len()))]
    fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(closure) => closure.invoke(args, self),
            other => Err(not_callable(other.type_name())),
        }
    }

    #[cold]
    fn binding_error(&self, err: BindingError) -> Unwind {
        Unwind::Error(EvalError::from_binding(err, &self.interner))
    }
}

impl StringLookup for Interpreter {
    fn lookup(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }
}

impl BodyEvaluator for Interpreter {
    fn eval_body(&mut self, closure: &ClosureValue, call_frame: FrameRef) -> EvalResult {
        let code = closure.code();
        self.call_stack
            .push(CallFrame::new(code.shared_name()))
            .map_err(|e| self.call_stack.attach_backtrace(e))?;

        let result = {
            let mut scoped = self.scoped_call(call_frame, code.arena().clone());
            let body = code.body();
            let body_expr = *scoped.arena.get(body);
            // A block body shares the call frame with the parameters
            let flow = match body_expr {
                Expr::Block { stmts } => {
                    let arena = scoped.arena.clone();
                    scoped.eval_stmts(arena.get_list(stmts))
                }
                _ => scoped.eval_expr(body),
            };
            settle(flow)
        };

        let result = result.map_err(|e| self.call_stack.attach_backtrace(e));
        self.call_stack.pop();
        result
    }
}

#[cfg(test)]
mod tests;
