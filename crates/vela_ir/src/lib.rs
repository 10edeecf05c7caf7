//! AST and intermediate representation types shared by the parser and
//! evaluator.
//!
//! The evaluator's input contract (spec §3): every expression carries a
//! source span; expressions live in a flat [`arena::ExprArena`] addressed
//! by [`ids::ExprId`]; patterns are a small recursive tree in
//! [`pattern`].

mod arena;
mod expr;
mod ids;
mod interner;
mod name;
mod operators;
mod pattern;
mod span;

pub use arena::ExprArena;
pub use expr::{
    ArrayElement, ArrayElementKind, ExprKind, ExprRef, Field, FieldKey, ForClause, MatchArm,
    TemplatePart, WhereBinding,
};
pub use ids::{ExprId, ListRange, PatternId, StringId};
pub use interner::StringInterner;
pub use name::Name;
pub use operators::{BinaryOp, UnaryOp};
pub use pattern::{ObjectPatternField, Pattern, PatternKind, PatternLiteral};
pub use span::Span;

/// A parsed module's arena, shared by every closure created while
/// evaluating it (and the module's own cached export, once loaded).
pub type SharedArena = std::rc::Rc<ExprArena>;
