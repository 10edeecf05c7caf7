//! Lexical environment: a persistent, singly-linked chain of frames.
//!
//! Grounded in the teacher's `ori_eval::environment::{Scope, LocalScope}`
//! (an `Rc<RefCell<_>>`-backed scope stack), generalized two ways the
//! teacher's strict language doesn't need:
//!
//! - A frame can bind exactly one name (`Frame::Single`), matching
//!   spec.md's "singly-linked list of frames, each frame holding one
//!   binding" — this is what lambda application, `let`, and pattern
//!   destructuring extend with.
//! - A frame can bind a whole table at once (`Frame::Batch`), which is
//!   how the root environment installs builtins and auto-imported stdlib
//!   modules without walking one link per name at lookup time.
//!
//! `Single` frames additionally support one controlled mutation (the
//! `RefCell`): self-referential `let`, and the two-pass thunk/back-patch
//! protocol `where` uses (spec.md §4.4, §4.5). No other part of the
//! evaluator mutates a frame once linked.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use vela_ir::Name;

use crate::Value;

enum Frame {
    Single { name: Name, value: RefCell<Value> },
    Batch(FxHashMap<Name, Value>),
}

struct EnvNode {
    frame: Frame,
    parent: Environment,
}

/// A possibly-empty environment chain. Cheap to clone (one `Rc` bump).
#[derive(Clone, Default)]
pub struct Environment(Option<Rc<EnvNode>>);

impl Environment {
    pub fn root() -> Self {
        Environment(None)
    }

    /// Extend with a single `{name, value}` frame — what the pattern
    /// matcher, `let`, and lambda application use.
    #[must_use]
    pub fn extend_single(&self, name: Name, value: Value) -> Environment {
        Environment(Some(Rc::new(EnvNode {
            frame: Frame::Single {
                name,
                value: RefCell::new(value),
            },
            parent: self.clone(),
        })))
    }

    /// Extend with a whole table of bindings installed atomically — used
    /// to seed builtins and auto-imported stdlib modules.
    #[must_use]
    pub fn extend_batch(&self, bindings: FxHashMap<Name, Value>) -> Environment {
        Environment(Some(Rc::new(EnvNode {
            frame: Frame::Batch(bindings),
            parent: self.clone(),
        })))
    }

    /// Walks from the current frame to the root, returning the first
    /// match (spec.md's Environment lookup rule).
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut node = self.0.as_ref();
        while let Some(n) = node {
            match &n.frame {
                Frame::Single { name: bound, value } if *bound == name => {
                    return Some(value.borrow().clone());
                }
                Frame::Single { .. } => {}
                Frame::Batch(map) => {
                    if let Some(value) = map.get(&name) {
                        return Some(value.clone());
                    }
                }
            }
            node = n.parent.0.as_ref();
        }
        None
    }

    /// Overwrites the value of the innermost frame, which must be a
    /// `Single` frame created by this same `Environment` handle. Used only
    /// by `let`-self-reference and `where`'s thunk back-patch.
    ///
    /// No-op if the innermost frame is a `Batch` frame or the environment
    /// is empty — those never get backpatched.
    pub fn set_innermost(&self, value: Value) {
        if let Some(node) = &self.0 {
            if let Frame::Single { value: cell, .. } = &node.frame {
                *cell.borrow_mut() = value;
            }
        }
    }

    /// All names bound anywhere in this chain, for did-you-mean lookups.
    /// Root-first so shadowing duplicates appear once in a sensible order
    /// isn't guaranteed here — callers dedupe by string.
    pub fn all_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        let mut node = self.0.as_ref();
        while let Some(n) = node {
            match &n.frame {
                Frame::Single { name, .. } => names.push(*name),
                Frame::Batch(map) => names.extend(map.keys().copied()),
            }
            node = n.parent.0.as_ref();
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    #[test]
    fn lookup_finds_nearest_binding() {
        let env = Environment::root()
            .extend_single(name(1), Value::Int(1))
            .extend_single(name(1), Value::Int(2));
        assert_eq!(env.lookup(name(1)), Some(Value::Int(2)));
    }

    #[test]
    fn lookup_walks_to_parent() {
        let env = Environment::root()
            .extend_single(name(1), Value::Int(1))
            .extend_single(name(2), Value::Int(2));
        assert_eq!(env.lookup(name(1)), Some(Value::Int(1)));
        assert_eq!(env.lookup(name(3)), None);
    }

    #[test]
    fn batch_frame_is_searched() {
        let mut map = FxHashMap::default();
        map.insert(name(5), Value::Bool(true));
        let env = Environment::root().extend_batch(map);
        assert_eq!(env.lookup(name(5)), Some(Value::Bool(true)));
    }

    #[test]
    fn set_innermost_overwrites_single_frame() {
        let env = Environment::root().extend_single(name(1), Value::Null);
        env.set_innermost(Value::Int(42));
        assert_eq!(env.lookup(name(1)), Some(Value::Int(42)));
    }

    #[test]
    fn irrelevant_binding_does_not_change_lookup() {
        let base = Environment::root().extend_single(name(1), Value::Int(1));
        let extended = base.extend_single(name(99), Value::Int(2));
        assert_eq!(base.lookup(name(1)), extended.lookup(name(1)));
    }
}
