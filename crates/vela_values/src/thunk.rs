//! Lazy evaluation cell with a three-state cache (spec.md §4.2).
//!
//! The cell itself only holds the suspended computation and its cache
//! state; `force` (the state machine driver) lives in `vela_eval`, since
//! driving it means re-entering the expression evaluator. That split
//! mirrors the teacher's `LocalScope<T>` idiom (`ori_eval::environment`):
//! the cell is a thin, factory-constructed `Rc<RefCell<_>>` wrapper, and
//! the logic that mutates it lives one layer up.

use std::cell::RefCell;

use vela_ir::{ExprId, SharedArena, Span};

use crate::{Environment, Value};

/// `unevaluated -> evaluating -> evaluated(v)`. A second `force` while in
/// `evaluating` is the cyclic-reference condition.
pub enum ThunkState {
    Unevaluated,
    Evaluating,
    Evaluated(Value),
}

/// A suspended computation: an expression plus the environment and
/// directory it should be evaluated in.
pub struct ThunkCell {
    pub expr: ExprId,
    pub arena: SharedArena,
    /// `RefCell` so `where`'s back-patch pass (spec.md §4.5) can rewrite
    /// the captured environment after all sibling bindings exist.
    pub env: RefCell<Environment>,
    pub current_dir: std::rc::Rc<str>,
    pub state: RefCell<ThunkState>,
    /// The field's defining key span, used only to build the two-span
    /// `cyclic_reference` diagnostic for object-field thunks.
    pub field_key_span: Option<Span>,
}

impl ThunkCell {
    pub fn new(
        expr: ExprId,
        arena: SharedArena,
        env: Environment,
        current_dir: std::rc::Rc<str>,
        field_key_span: Option<Span>,
    ) -> Self {
        ThunkCell {
            expr,
            arena,
            env: RefCell::new(env),
            current_dir,
            state: RefCell::new(ThunkState::Unevaluated),
            field_key_span,
        }
    }

    pub fn rebind_env(&self, env: Environment) {
        *self.env.borrow_mut() = env;
    }

    pub fn env(&self) -> Environment {
        self.env.borrow().clone()
    }
}
