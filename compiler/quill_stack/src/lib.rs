//! Stack growth for deep recursion in the template evaluator.
//!
//! Template trees nest arbitrarily (lists inside conditionals inside loops)
//! and named templates may invoke each other recursively. Each level of
//! nesting is one native stack frame in the evaluator, so a pathological
//! tree can exhaust the default thread stack long before the configured
//! template depth limit is reached.
//!
//! On native targets [`ensure_sufficient_stack`] grows the stack on demand
//! through `stacker`. On wasm32 it calls the closure directly.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// wasm32 manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
