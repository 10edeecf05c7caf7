//! Pattern AST.
//!
//! Unlike expressions, patterns are a plain recursive tree rather
//! than an arena. The grammar is shallow (four shapes, no generics or
//! guards) so a second arena would add bookkeeping without a measurable
//! win — this is a deliberate scale-down from the teacher's arena'd
//! `MatchPattern`, recorded in DESIGN.md.

use crate::name::Name;
use crate::span::Span;

/// A pattern together with its source span.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern { kind, span }
    }

    /// `Some(name)` if this pattern is a bare identifier — the shape that
    /// gets self-reference/mutual-recursion treatment in `let`/`where`.
    pub fn as_simple_identifier(&self) -> Option<Name> {
        match self.kind {
            PatternKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// A scalar pattern literal, matched by structural equality.
#[derive(Clone, Debug)]
pub enum PatternLiteral {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Symbol(Name),
    Str(Box<str>),
}

#[derive(Clone, Debug)]
pub enum PatternKind {
    Identifier(Name),
    Literal(PatternLiteral),
    Tuple(Vec<Pattern>),
    Array {
        elements: Vec<Pattern>,
        /// `Some(name)` when the pattern ends in `, ...rest]`.
        rest: Option<Name>,
    },
    Object(Vec<ObjectPatternField>),
}

#[derive(Clone, Debug)]
pub struct ObjectPatternField {
    pub key: Box<str>,
    pub key_span: Span,
    pub pattern: Pattern,
}
