//! Environment frames for lexical scoping.
//!
//! A frame is created whenever a scope is entered: the program's outermost
//! scope, every function call and every block. Frames are shared, never
//! copied. A closure holds a `FrameRef` to the frame it was created in, and
//! that handle is what keeps the frame (and its ancestors) alive after the
//! defining call returns.
//!
//! # Locking
//!
//! Each frame's bindings sit behind their own `parking_lot::Mutex`. The lock
//! is taken for one `define`/`get`/`set`/`update` on that frame and released
//! before moving on to the parent, so no operation ever holds two frame
//! locks. The parent link is immutable and needs no lock.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tether_ir::Name;

use crate::value::Value;

/// Failure of a frame operation.
///
/// Carries the interned name; the evaluator resolves it for display when it
/// turns this into an `EvalError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// No frame in the chain defines the name.
    #[error("unbound name {0:?}")]
    Unbound(Name),
    /// The name is already defined in this very frame.
    #[error("duplicate binding {0:?}")]
    Duplicate(Name),
}

struct FrameData {
    /// Bindings owned by this frame. Names are unique per frame.
    bindings: Mutex<FxHashMap<Name, Value>>,
    /// Enclosing scope. Fixed at creation.
    parent: Option<FrameRef>,
    /// Number of ancestors; the root frame has depth 0.
    depth: usize,
}

/// Shared handle to an environment frame.
///
/// Cloning the handle shares the frame; it never copies bindings.
#[derive(Clone)]
pub struct FrameRef(Arc<FrameData>);

impl FrameRef {
    /// Create a frame with an optional parent.
    pub fn new(parent: Option<FrameRef>) -> Self {
        let depth = parent.as_ref().map_or(0, |p| p.depth() + 1);
        FrameRef(Arc::new(FrameData {
            bindings: Mutex::new(FxHashMap::default()),
            parent,
            depth,
        }))
    }

    /// Create a parentless frame (the outermost scope).
    pub fn root() -> Self {
        Self::new(None)
    }

    /// Create a frame nested inside `parent`.
    pub fn child_of(parent: &FrameRef) -> Self {
        Self::new(Some(parent.clone()))
    }

    pub fn parent(&self) -> Option<&FrameRef> {
        self.0.parent.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.0.depth
    }

    /// Define `name` in this frame.
    ///
    /// Shadowing a parent's binding is fine; redefining a name this frame
    /// already owns is `BindingError::Duplicate`.
    pub fn define(&self, name: Name, value: Value) -> Result<(), BindingError> {
        use std::collections::hash_map::Entry;

        match self.0.bindings.lock().entry(name) {
            Entry::Occupied(_) => Err(BindingError::Duplicate(name)),
            Entry::Vacant(slot) => {
                tracing::trace!(?name, depth = self.depth(), "define");
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Look up `name`, walking outward from this frame.
    pub fn get(&self, name: Name) -> Result<Value, BindingError> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.0.bindings.lock().get(&name) {
                return Ok(value.clone());
            }
            frame = frame.parent().ok_or(BindingError::Unbound(name))?;
        }
    }

    /// Overwrite `name` in the frame that owns it.
    ///
    /// The write lands in the owning frame, not in `self`, so every closure
    /// sharing that frame observes it.
    pub fn set(&self, name: Name, value: Value) -> Result<(), BindingError> {
        self.update(name, |slot| *slot = value)
    }

    /// Read-modify-write `name` in the frame that owns it.
    ///
    /// `f` runs while the owning frame is locked, so concurrent updates of a
    /// shared binding never lose writes. `f` must not touch the same frame.
    pub fn update<T>(&self, name: Name, f: impl FnOnce(&mut Value) -> T) -> Result<T, BindingError> {
        let mut frame = self;
        loop {
            if let Some(slot) = frame.0.bindings.lock().get_mut(&name) {
                tracing::trace!(?name, depth = frame.depth(), "set");
                return Ok(f(slot));
            }
            frame = frame.parent().ok_or(BindingError::Unbound(name))?;
        }
    }

    /// Whether this frame itself (ignoring parents) defines `name`.
    pub fn contains_local(&self, name: Name) -> bool {
        self.0.bindings.lock().contains_key(&name)
    }

    /// Number of bindings this frame owns.
    pub fn local_count(&self) -> usize {
        self.0.bindings.lock().len()
    }

    /// Whether two handles refer to the same frame.
    pub fn ptr_eq(&self, other: &FrameRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this frame.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Non-owning handle, for observing when a frame is freed.
    pub fn downgrade(&self) -> WeakFrameRef {
        WeakFrameRef(Arc::downgrade(&self.0))
    }
}

impl fmt::Debug for FrameRef {
    // Bindings are not printed: a frame may hold a closure that captured it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRef")
            .field("depth", &self.depth())
            .field("locals", &self.local_count())
            .finish()
    }
}

/// Weak handle to an environment frame.
#[derive(Clone, Debug)]
pub struct WeakFrameRef(Weak<FrameData>);

impl WeakFrameRef {
    pub fn upgrade(&self) -> Option<FrameRef> {
        self.0.upgrade().map(FrameRef)
    }

    /// Whether the frame has been freed.
    pub fn is_dropped(&self) -> bool {
        self.0.strong_count() == 0
    }
}
