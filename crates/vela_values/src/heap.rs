//! Enforced heap allocation for `Value`'s reference-counted variants.
//!
//! `Heap<T>` wraps `Rc<T>` with a private constructor so every heap value
//! is created through a `Value::` factory method rather than an ad hoc
//! `Rc::new` scattered through the evaluator. The evaluator is strictly
//! single-threaded (spec.md §5), so `Rc` replaces the teacher's `Arc` —
//! there is no cross-thread sharing to pay for.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

#[repr(transparent)]
pub struct Heap<T>(Rc<T>);

impl<T> Heap<T> {
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}
