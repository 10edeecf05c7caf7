//! Stack safety utilities for deep recursion.
//!
//! The evaluator walks the expression tree recursively (`eval`, `force`,
//! pattern matching, the merger), and a deeply nested expression — a long
//! `a + (b + (c + ...))` chain, or a deeply recursive function the
//! language itself can express — can exhaust the native stack well before
//! it exhausts any language-level limit. [`ensure_sufficient_stack`] grows
//! the stack on demand instead of imposing an artificial recursion-depth
//! cap.
//!
//! # Platform support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack.
//! - **WASM targets**: no-op passthrough (WASM manages its own stack).

/// Minimum stack space to keep available before growing.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate on each growth.
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the stack first if the remaining space is below the
/// red zone. Wrap any recursive evaluator entry point that can be driven
/// by user-controlled nesting depth.
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
    fn shallow_recursion() {
        fn factorial(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
        }
        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn deep(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep(n - 1) + 1 })
        }
        assert_eq!(deep(200_000), 200_000);
    }

    #[test]
    fn returns_closure_result() {
        assert_eq!(ensure_sufficient_stack(|| 42), 42);
    }
}
