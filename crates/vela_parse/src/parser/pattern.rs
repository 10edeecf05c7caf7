//! Pattern parsing: identifiers, literals, tuples, arrays (with optional
//! `...rest`), and objects (with `{name}` shorthand or `{name: pattern}`
//! nesting). Shared by lambda parameters, `let`/`where` bindings,
//! for-clauses, and `when ... matches` arms.

use vela_ir::{Pattern, PatternKind, PatternLiteral, Span};

use crate::error::ParseError;
use crate::lexer::{Keyword, TokenKind};

use super::Parser;

impl Parser {
    pub(super) fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        let start = self.peek_span();
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                let name = self.interner.intern(&name);
                Ok(Pattern::new(PatternKind::Identifier(name), start))
            }
            TokenKind::Int(n) => {
                self.advance();
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Int(n)), start))
            }
            TokenKind::Float(n) => {
                self.advance();
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Float(n)), start))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Bool(true)), start))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Bool(false)), start))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Null), start))
            }
            TokenKind::Symbol(name) => {
                self.advance();
                let name = self.interner.intern(&name);
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Symbol(name)), start))
            }
            TokenKind::TemplateStr(parts) => {
                self.advance();
                let text = Self::plain_literal_text(&parts).ok_or_else(|| {
                    ParseError::unexpected_token("a string pattern cannot contain interpolation", start)
                })?;
                Ok(Pattern::new(PatternKind::Literal(PatternLiteral::Str(text.into_boxed_str())), start))
            }
            TokenKind::LParen => self.parse_tuple_pattern(start),
            TokenKind::LBracket => self.parse_array_pattern(start),
            TokenKind::LBrace => self.parse_object_pattern(start),
            other => Err(ParseError::unexpected_token(format!("expected a pattern, found {other}"), start)),
        }
    }

    fn parse_tuple_pattern(&mut self, start: Span) -> Result<Pattern, ParseError> {
        self.advance(); // (
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RParen) {
            elements.push(self.parse_pattern()?);
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RParen) {
                    break;
                }
                elements.push(self.parse_pattern()?);
            }
        }
        let close = self.expect(&TokenKind::RParen, "`)`")?;
        let span = start.join(close.span);

        if elements.is_empty() {
            return Err(ParseError::unexpected_token("empty `()` is not a valid pattern", span));
        }
        if elements.len() == 1 {
            // `(pattern)` is grouping, not a one-element tuple -- matches
            // how parenthesized expressions require a comma to become a
            // tuple.
            let mut only = elements.remove(0);
            only.span = span;
            return Ok(only);
        }
        Ok(Pattern::new(PatternKind::Tuple(elements), span))
    }

    fn parse_array_pattern(&mut self, start: Span) -> Result<Pattern, ParseError> {
        self.advance(); // [
        let mut elements = Vec::new();
        let mut rest = None;

        if !self.check(&TokenKind::RBracket) {
            loop {
                if self.eat(&TokenKind::Ellipsis) {
                    let name_span = self.peek_span();
                    let TokenKind::Ident(name) = self.peek().clone() else {
                        return Err(ParseError::unexpected_token(
                            "expected an identifier after `...`",
                            name_span,
                        ));
                    };
                    self.advance();
                    rest = Some(self.interner.intern(&name));
                    break;
                }
                elements.push(self.parse_pattern()?);
                if !self.eat(&TokenKind::Comma) || self.check(&TokenKind::RBracket) {
                    break;
                }
            }
        }

        let close = self.expect(&TokenKind::RBracket, "`]`")?;
        let span = start.join(close.span);
        Ok(Pattern::new(PatternKind::Array { elements, rest }, span))
    }

    fn parse_object_pattern(&mut self, start: Span) -> Result<Pattern, ParseError> {
        self.advance(); // {
        let mut fields = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            let field_span = self.peek_span();
            let TokenKind::Ident(name) = self.peek().clone() else {
                return Err(ParseError::unexpected_token("expected a field name in object pattern", field_span));
            };
            self.advance();
            let key: Box<str> = name.into_boxed_str();

            let pattern = if self.eat(&TokenKind::Colon) {
                self.parse_pattern()?
            } else {
                let bound_name = self.interner.intern(&key);
                Pattern::new(PatternKind::Identifier(bound_name), field_span)
            };

            fields.push(vela_ir::ObjectPatternField { key, key_span: field_span, pattern });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let span = start.join(close.span);
        Ok(Pattern::new(PatternKind::Object(fields), span))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use vela_ir::{PatternKind, StringInterner};

    use crate::parser::Parser;

    fn pattern_of(source: &str) -> PatternKind {
        let interner = Rc::new(StringInterner::new());
        let mut parser = Parser::for_test(source, &interner);
        parser.parse_pattern().expect("pattern should parse").kind
    }

    #[test]
    fn identifier_pattern() {
        assert!(matches!(pattern_of("x"), PatternKind::Identifier(_)));
    }

    #[test]
    fn array_pattern_with_rest() {
        match pattern_of("[a, b, ...rest]") {
            PatternKind::Array { elements, rest } => {
                assert_eq!(elements.len(), 2);
                assert!(rest.is_some());
            }
            other => panic!("expected array pattern, got {other:?}"),
        }
    }

    #[test]
    fn object_pattern_shorthand_and_nested() {
        match pattern_of("{a, b: [c]}") {
            PatternKind::Object(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(&*fields[0].key, "a");
                assert!(matches!(fields[0].pattern.kind, PatternKind::Identifier(_)));
                assert_eq!(&*fields[1].key, "b");
                assert!(matches!(fields[1].pattern.kind, PatternKind::Array { .. }));
            }
            other => panic!("expected object pattern, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_single_pattern_is_not_a_tuple() {
        assert!(matches!(pattern_of("(x)"), PatternKind::Identifier(_)));
    }

    #[test]
    fn tuple_pattern_requires_comma() {
        match pattern_of("(a, b)") {
            PatternKind::Tuple(elements) => assert_eq!(elements.len(), 2),
            other => panic!("expected tuple pattern, got {other:?}"),
        }
    }
}
