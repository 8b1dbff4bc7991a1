//! Stack growth for deeply recursive compiler and interpreter paths.
//!
//! The parser, checker, IR generator and interpreter all recurse over
//! nested expressions and calls. Wrapping those recursion points in
//! [`ensure_sufficient_stack`] lets guest programs nest or recurse deeply
//! without overflowing the host thread's stack.
//!
//! On `wasm32` this is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
