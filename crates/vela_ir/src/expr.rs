//! Expression kinds and their auxiliary payload types.
//!
//! Every variant in spec.md §3 "Expressions" has a case here. `ExprKind`
//! itself stays small: payloads bigger than a couple of words (field
//! lists, match arms, for-clauses) live in side pools on
//! [`crate::arena::ExprArena`] and are referenced by [`ListRange`].

use crate::ids::{ExprId, ListRange, PatternId, StringId};
use crate::name::Name;
use crate::operators::{BinaryOp, UnaryOp};
use crate::span::Span;

/// One expression node. Stored in `ExprArena::expr_kinds`, parallel to
/// `ExprArena::expr_spans` at the same [`ExprId`] index.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// `#ok`, `#error`, ... — the name excludes the leading `#`.
    Symbol(Name),
    Str(StringId),
    /// A string literal with `${...}` interpolation. An all-literal string
    /// still lowers to this with a single `Literal` part when it contains
    /// no placeholders... actually no: plain strings use `Str` above, this
    /// is only emitted when the parser sees at least one interpolation.
    Interp(ListRange<TemplatePart>),
    Ident(Name),

    Lambda {
        param: PatternId,
        body: ExprId,
        doc: Option<StringId>,
    },
    Apply {
        func: ExprId,
        arg: ExprId,
    },
    Let {
        pattern: PatternId,
        value: ExprId,
        body: ExprId,
        doc: Option<StringId>,
    },
    Where {
        body: ExprId,
        bindings: ListRange<WhereBinding>,
    },

    Unary {
        op: UnaryOp,
        expr: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },

    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    WhenMatches {
        scrutinee: ExprId,
        arms: ListRange<MatchArm>,
        otherwise: Option<ExprId>,
    },

    Array(ListRange<ArrayElement>),
    Tuple(ListRange<ExprId>),
    Object(ListRange<Field>),
    ObjectExtend {
        base: ExprId,
        fields: ListRange<Field>,
    },

    ArrayComp {
        body: ExprId,
        clauses: ListRange<ForClause>,
        filter: Option<ExprId>,
    },
    ObjectComp {
        key: ExprId,
        value: ExprId,
        clauses: ListRange<ForClause>,
        filter: Option<ExprId>,
    },

    Import {
        path: StringId,
        path_span: Span,
    },
    FieldAccess {
        object: ExprId,
        name: Name,
        name_span: Span,
    },
    Index {
        object: ExprId,
        index: ExprId,
    },
    /// `.a.b.c` reified as a unary accessor function.
    FieldAccessor(ListRange<Name>),
    /// `obj.{x, y}` — projects a subset of fields into a new object.
    FieldProjection {
        object: ExprId,
        names: ListRange<Name>,
    },
    /// `(+)`, `(==)`, ... — a binary operator reified as `x -> y -> x op y`.
    OperatorAsFunction(BinaryOp),

    Range {
        start: ExprId,
        end: ExprId,
        inclusive: bool,
    },
}

/// `expr` with its source span, as produced by the parser.
#[derive(Copy, Clone, Debug)]
pub struct ExprRef {
    pub id: ExprId,
    pub span: Span,
}

/// A chunk of a `string with ${interpolation}`.
#[derive(Clone, Debug)]
pub enum TemplatePart {
    Literal(StringId),
    Expr(ExprId),
}

/// One `{pattern} = {value}` binding inside a `where { ... }` block.
#[derive(Clone, Debug)]
pub struct WhereBinding {
    pub pattern: PatternId,
    pub value: ExprId,
    pub doc: Option<StringId>,
}

/// One `pattern -> expr` arm in a `when ... matches { ... }`.
#[derive(Clone, Debug)]
pub struct MatchArm {
    pub pattern: PatternId,
    pub body: ExprId,
}

/// One clause in an array/object comprehension: `pattern <- iterable`.
#[derive(Clone, Debug)]
pub struct ForClause {
    pub pattern: PatternId,
    pub iterable: ExprId,
    pub span: Span,
}

/// The four kinds of array-literal elements spec.md §3 lists.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ArrayElementKind {
    Normal,
    Spread,
    ConditionalIf,
    ConditionalUnless,
}

#[derive(Clone, Debug)]
pub struct ArrayElement {
    pub kind: ArrayElementKind,
    pub value: ExprId,
    /// Present iff `kind` is `ConditionalIf`/`ConditionalUnless`.
    pub condition: Option<ExprId>,
}

/// Key of an object field: either a static string known at parse time, or
/// a dynamic expression evaluated at construction time.
#[derive(Clone, Debug)]
pub enum FieldKey {
    Static(StringId),
    Dynamic(ExprId),
}

/// One field of an object literal or object-extend block.
#[derive(Clone, Debug)]
pub struct Field {
    pub key: FieldKey,
    pub key_span: Span,
    pub value: ExprId,
    /// `true` for `key { ... }` (deep-patch), `false` for `key: value`.
    pub is_patch: bool,
    pub doc: Option<StringId>,
}
