//! Stack growth for deeply nested evaluation.
//!
//! Expression evaluation and closure calls recurse on the native stack.
//! The call-depth limit bounds closure recursion, but a single deeply nested
//! expression can still exhaust a small thread stack; `stacker` grows it on
//! demand.

/// Run `f`, growing the stack first if little of it is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than this remains (100KB).
    const RED_ZONE: usize = 100 * 1024;

    /// Size of each new stack segment (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
