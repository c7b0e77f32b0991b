//! `InterpreterBuilder` for creating `Interpreter` instances.

use tether_ir::{SharedArena, SharedInterner};

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::environment::FrameRef;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Closure calls allowed to be active at once before `StackOverflow`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Builder for [`Interpreter`].
///
/// Defaults: stdout printing, a fresh parentless global frame and a call
/// depth limit of [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    interner: SharedInterner,
    arena: SharedArena,
    global: Option<FrameRef>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    /// Start a builder for programs allocated in `arena`.
    pub fn new(interner: &SharedInterner, arena: &SharedArena) -> Self {
        Self {
            interner: interner.clone(),
            arena: arena.clone(),
            global: None,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit on nested closure calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Use an existing frame as the outermost scope.
    ///
    /// Lets a host pre-populate bindings, or run several programs against
    /// the same global state.
    #[must_use]
    pub fn global(mut self, frame: FrameRef) -> Self {
        self.global = Some(frame);
        self
    }

    pub fn build(self) -> Interpreter {
        let global = self.global.unwrap_or_else(FrameRef::root);
        Interpreter {
            interner: self.interner,
            arena: self.arena,
            frame: global.clone(),
            global,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}
