//! Flat storage for one parsed module's expressions and patterns.
//!
//! Struct-of-arrays layout: `expr_kinds` and `expr_spans` are parallel
//! `Vec`s indexed by [`ExprId`], keeping the hot path (reading a kind) off
//! the same cache line as the span, which diagnostics only touch on the
//! error path. Variable-length payloads (field lists, match arms, ...) are
//! flattened into their own side pools and referenced by [`ListRange`].

use crate::expr::{ArrayElement, Field, ForClause, MatchArm, TemplatePart, WhereBinding};
use crate::ids::{ExprId, ListRange, PatternId, StringId};
use crate::name::Name;
use crate::pattern::Pattern;
use crate::span::Span;
use crate::ExprKind;

#[derive(Default)]
pub struct ExprArena {
    expr_kinds: Vec<ExprKind>,
    expr_spans: Vec<Span>,

    patterns: Vec<Pattern>,
    strings: Vec<Box<str>>,

    expr_lists: Vec<ExprId>,
    name_lists: Vec<Name>,
    fields: Vec<Field>,
    match_arms: Vec<MatchArm>,
    array_elements: Vec<ArrayElement>,
    for_clauses: Vec<ForClause>,
    where_bindings: Vec<WhereBinding>,
    template_parts: Vec<TemplatePart>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::from_raw(to_u32(self.expr_kinds.len()));
        self.expr_kinds.push(kind);
        self.expr_spans.push(span);
        id
    }

    pub fn push_pattern(&mut self, pattern: Pattern) -> PatternId {
        let id = PatternId::from_raw(to_u32(self.patterns.len()));
        self.patterns.push(pattern);
        id
    }

    pub fn push_string(&mut self, s: impl Into<Box<str>>) -> StringId {
        let id = StringId::from_raw(to_u32(self.strings.len()));
        self.strings.push(s.into());
        id
    }

    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.expr_kinds[id.index()]
    }

    pub fn span(&self, id: ExprId) -> Span {
        self.expr_spans[id.index()]
    }

    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    pub fn string(&self, id: StringId) -> &str {
        &self.strings[id.index()]
    }

    pub fn len(&self) -> usize {
        self.expr_kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expr_kinds.is_empty()
    }

    // --- side pools ---------------------------------------------------

    pub fn push_expr_list(&mut self, items: impl IntoIterator<Item = ExprId>) -> ListRange<ExprId> {
        push_list(&mut self.expr_lists, items)
    }

    pub fn expr_list(&self, range: ListRange<ExprId>) -> &[ExprId] {
        &self.expr_lists[range.range()]
    }

    pub fn push_name_list(&mut self, items: impl IntoIterator<Item = Name>) -> ListRange<Name> {
        push_list(&mut self.name_lists, items)
    }

    pub fn name_list(&self, range: ListRange<Name>) -> &[Name] {
        &self.name_lists[range.range()]
    }

    pub fn push_fields(&mut self, items: impl IntoIterator<Item = Field>) -> ListRange<Field> {
        push_list(&mut self.fields, items)
    }

    pub fn fields(&self, range: ListRange<Field>) -> &[Field] {
        &self.fields[range.range()]
    }

    pub fn push_match_arms(
        &mut self,
        items: impl IntoIterator<Item = MatchArm>,
    ) -> ListRange<MatchArm> {
        push_list(&mut self.match_arms, items)
    }

    pub fn match_arms(&self, range: ListRange<MatchArm>) -> &[MatchArm] {
        &self.match_arms[range.range()]
    }

    pub fn push_array_elements(
        &mut self,
        items: impl IntoIterator<Item = ArrayElement>,
    ) -> ListRange<ArrayElement> {
        push_list(&mut self.array_elements, items)
    }

    pub fn array_elements(&self, range: ListRange<ArrayElement>) -> &[ArrayElement] {
        &self.array_elements[range.range()]
    }

    pub fn push_for_clauses(
        &mut self,
        items: impl IntoIterator<Item = ForClause>,
    ) -> ListRange<ForClause> {
        push_list(&mut self.for_clauses, items)
    }

    pub fn for_clauses(&self, range: ListRange<ForClause>) -> &[ForClause] {
        &self.for_clauses[range.range()]
    }

    pub fn push_where_bindings(
        &mut self,
        items: impl IntoIterator<Item = WhereBinding>,
    ) -> ListRange<WhereBinding> {
        push_list(&mut self.where_bindings, items)
    }

    pub fn where_bindings(&self, range: ListRange<WhereBinding>) -> &[WhereBinding] {
        &self.where_bindings[range.range()]
    }

    pub fn push_template_parts(
        &mut self,
        items: impl IntoIterator<Item = TemplatePart>,
    ) -> ListRange<TemplatePart> {
        push_list(&mut self.template_parts, items)
    }

    pub fn template_parts(&self, range: ListRange<TemplatePart>) -> &[TemplatePart] {
        &self.template_parts[range.range()]
    }
}

fn push_list<T>(pool: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> ListRange<T> {
    let start = to_u32(pool.len());
    pool.extend(items);
    let len = to_u32(pool.len()) - start;
    ListRange::new(start, len)
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("arena exceeded {} entries", u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprKind;

    #[test]
    fn push_and_read_back_expr() {
        let mut arena = ExprArena::new();
        let id = arena.push_expr(ExprKind::Int(42), Span::new(0, 2));
        assert!(matches!(arena.kind(id), ExprKind::Int(42)));
        assert_eq!(arena.span(id), Span::new(0, 2));
    }

    #[test]
    fn expr_list_round_trips() {
        let mut arena = ExprArena::new();
        let a = arena.push_expr(ExprKind::Int(1), Span::DUMMY);
        let b = arena.push_expr(ExprKind::Int(2), Span::DUMMY);
        let range = arena.push_expr_list([a, b]);
        assert_eq!(arena.expr_list(range), &[a, b]);
    }
}
