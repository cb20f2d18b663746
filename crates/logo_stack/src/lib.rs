//! Stack safety utilities for deep recursion.
//!
//! Prevents stack overflow in recursive procedure calls and nested
//! expression evaluation by dynamically growing the stack when needed.
//! A recursive user procedure (scenario 2's `fact`, or a deliberately deep
//! `CASCADE`/`REPEAT` nesting) walks the native Rust stack one frame per
//! Logo call; without this, a few thousand frames of recursion would blow
//! it.
//!
//! # Platform Support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack on
//!   demand.
//! - **WASM targets**: no-op passthrough (WASM has its own stack
//!   management).

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// Wrap recursive entry points (`Evaluator::evaluate`,
/// `Evaluator::execute_procedure`, template expansion) with this.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn recurse(n: u32) -> u32 {
            if n == 0 {
                0
            } else {
                ensure_sufficient_stack(|| 1 + recurse(n - 1))
            }
        }
        assert_eq!(recurse(50_000), 50_000);
    }
}
