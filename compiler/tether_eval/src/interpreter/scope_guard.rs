//! RAII guard for frame switches.
//!
//! [`ScopedInterpreter`] installs a frame (and, for calls, an arena) as the
//! interpreter's current one and puts the previous values back when dropped,
//! including during unwinding and on early `?` returns.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! evaluation continues through it as if it were the interpreter.

use std::mem;
use std::ops::{Deref, DerefMut};

use tether_ir::SharedArena;

use super::Interpreter;
use crate::environment::FrameRef;

/// Restores the interpreter's previous frame and arena on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    /// The frame that was current before this guard.
    saved_frame: FrameRef,
    /// The arena that was current, if this guard switched arenas.
    saved_arena: Option<SharedArena>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        mem::swap(&mut self.interpreter.frame, &mut self.saved_frame);
        if let Some(arena) = self.saved_arena.take() {
            self.interpreter.arena = arena;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `frame` current until the guard drops.
    pub fn scoped_frame(&mut self, frame: FrameRef) -> ScopedInterpreter<'_> {
        let saved_frame = mem::replace(&mut self.frame, frame);
        ScopedInterpreter {
            interpreter: self,
            saved_frame,
            saved_arena: None,
        }
    }

    /// Make `frame` current and run code from `arena` until the guard drops.
    pub(crate) fn scoped_call(&mut self, frame: FrameRef, arena: SharedArena) -> ScopedInterpreter<'_> {
        let saved_frame = mem::replace(&mut self.frame, frame);
        let saved_arena = mem::replace(&mut self.arena, arena);
        ScopedInterpreter {
            interpreter: self,
            saved_frame,
            saved_arena: Some(saved_arena),
        }
    }

    /// Run `f` with `frame` as the current frame.
    ///
    /// Host code uses this to evaluate against a frame it built itself.
    pub fn with_frame<T, F>(&mut self, frame: FrameRef, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped_frame(frame);
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::InterpreterBuilder;
    use tether_ir::{AstBuilder, ExprArena, SharedInterner};

    fn interpreter() -> Interpreter {
        let interner = SharedInterner::default();
        let mut b = AstBuilder::new(&interner);
        b.void();
        InterpreterBuilder::new(&interner, &b.finish()).build()
    }

    #[test]
    fn scoped_frame_restores_on_drop() {
        let mut interp = interpreter();
        let global = interp.global().clone();
        let child = FrameRef::child_of(&global);
        {
            let scoped = interp.scoped_frame(child.clone());
            assert!(scoped.current_frame().ptr_eq(&child));
        }
        assert!(interp.current_frame().ptr_eq(&global));
    }

    #[test]
    fn scoped_call_restores_arena() {
        let mut interp = interpreter();
        let original = interp.arena.clone();
        let other = SharedArena::new(ExprArena::new());
        {
            let scoped = interp.scoped_call(FrameRef::root(), other.clone());
            assert!(scoped.arena.ptr_eq(&other));
        }
        assert!(interp.arena.ptr_eq(&original));
    }

    #[test]
    fn with_frame_returns_closure_result() {
        let mut interp = interpreter();
        let frame = FrameRef::root();
        let depth = interp.with_frame(frame.clone(), |scoped| {
            assert!(scoped.current_frame().ptr_eq(&frame));
            scoped.current_frame().depth()
        });
        assert_eq!(depth, 0);
        assert!(interp.current_frame().ptr_eq(interp.global()));
    }
}
