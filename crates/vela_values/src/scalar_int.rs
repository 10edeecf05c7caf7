//! Integer newtype that prevents unchecked arithmetic.
//!
//! `ScalarInt` wraps `i64` and deliberately does not implement `Add`,
//! `Sub`, `Mul`, or `Div` — every arithmetic operation goes through a
//! `checked_*` method returning `Option<ScalarInt>`, so spec.md §4.3's
//! "integer operations use overflow-checked arithmetic and raise
//! `overflow` on wrap" can't be missed at a call site.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ScalarInt(i64);

impl ScalarInt {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_mul(self, rhs: Self) -> Option<Self> {
        match self.0.checked_mul(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `None` on division by zero or overflow (`i64::MIN / -1`). Callers
    /// distinguish the two by checking `rhs.is_zero()` first, since
    /// spec.md §4.3 wants a `division_by_zero` error distinct from
    /// `overflow`.
    #[inline]
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        match self.0.checked_div(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Debug for ScalarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ScalarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(ScalarInt::new(i64::MAX).checked_add(ScalarInt::new(1)), None);
        assert_eq!(
            ScalarInt::new(1).checked_add(ScalarInt::new(2)),
            Some(ScalarInt::new(3))
        );
    }

    #[test]
    fn checked_div_by_zero_is_none() {
        assert_eq!(ScalarInt::new(10).checked_div(ScalarInt::ZERO), None);
    }
}
