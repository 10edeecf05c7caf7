//! Recursive-descent / precedence-climbing parser.
//!
//! Grounded in the shape of the teacher's `ori_parse`: one `Parser`
//! struct holding a flat token stream and a cursor into it, a
//! precedence ladder of small `parse_*` methods (one per binding-power
//! tier), and snapshot/restore backtracking at the one genuinely
//! ambiguous point in the grammar -- telling a lambda parameter pattern
//! apart from an ordinary expression that happens to start the same way.
//!
//! Owns the `ExprArena` by value for the duration of one `parse()` call;
//! `lib.rs` wraps it in `Rc` only once parsing finishes, since nothing
//! needs shared ownership of it before then.

mod pattern;

use std::rc::Rc;

use vela_ir::{
    ArrayElement, ArrayElementKind, BinaryOp, ExprArena, ExprId, Field, FieldKey, ForClause,
    MatchArm, Name, Span, StringId, StringInterner, TemplatePart,
};

use crate::error::ParseError;
use crate::lexer::{Keyword, Lexer, RawPart, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    arena: ExprArena,
    interner: Rc<StringInterner>,
}

pub fn parse_module(source: &str, interner: &Rc<StringInterner>) -> Result<(vela_ir::SharedArena, ExprId), ParseError> {
    let tokens = Lexer::new(source, 0).tokenize()?;
    let mut parser = Parser { tokens, pos: 0, arena: ExprArena::new(), interner: interner.clone() };
    let root = parser.parse_program()?;
    Ok((Rc::new(parser.arena), root))
}

impl Parser {
    #[cfg(test)]
    fn for_test(source: &str, interner: &Rc<StringInterner>) -> Self {
        let tokens = Lexer::new(source, 0).tokenize().expect("test source should lex");
        Parser { tokens, pos: 0, arena: ExprArena::new(), interner: interner.clone() }
    }

    fn parse_program(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.parse_expr()?;
        self.expect_eof()?;
        Ok(expr)
    }

    // --- token stream helpers ------------------------------------------------

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(ParseError::unexpected_token(format!("expected {what}, found {found}"), self.peek_span()))
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek(), TokenKind::Eof) {
            Ok(())
        } else {
            let found = self.peek().clone();
            Err(ParseError::unexpected_token(format!("unexpected trailing input: {found}"), self.peek_span()))
        }
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.span(id)
    }

    fn span_join(&self, a: ExprId, b: ExprId) -> Span {
        self.span_of(a).join(self.span_of(b))
    }

    fn push_binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.span_join(lhs, rhs);
        self.arena.push_expr(vela_ir::ExprKind::Binary { op, lhs, rhs }, span)
    }

    fn take_doc(&mut self) -> Option<StringId> {
        if let TokenKind::Doc(text) = self.peek().clone() {
            self.advance();
            Some(self.arena.push_string(text))
        } else {
            None
        }
    }

    fn plain_literal_text(parts: &[RawPart]) -> Option<String> {
        if parts.is_empty() {
            return Some(String::new());
        }
        if parts.len() == 1 {
            if let RawPart::Literal(text) = &parts[0] {
                return Some(text.clone());
            }
        }
        None
    }

    // --- top-level expression entry point ------------------------------------

    fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        vela_stack::ensure_sufficient_stack(|| self.parse_expr_uncached())
    }

    fn parse_expr_uncached(&mut self) -> Result<ExprId, ParseError> {
        let doc = self.take_doc();
        let expr = self.parse_lambda_or_let(doc)?;
        self.maybe_parse_where(expr)
    }

    /// A leading doc comment can attach to a `let` binding or a lambda
    /// parameter; neither owns the whole `parse_expr` entry point, so
    /// this tries both before falling through to plain binary parsing
    /// (where a doc comment, if consumed but unused, is simply dropped).
    fn parse_lambda_or_let(&mut self, doc: Option<StringId>) -> Result<ExprId, ParseError> {
        if let Some(lambda) = self.try_parse_lambda(doc)? {
            return Ok(lambda);
        }
        if self.check(&TokenKind::Keyword(Keyword::Let)) {
            return self.parse_let(doc);
        }
        self.parse_pipeline()
    }

    fn try_parse_lambda(&mut self, doc: Option<StringId>) -> Result<Option<ExprId>, ParseError> {
        let checkpoint = self.pos;
        let pattern = match self.parse_pattern() {
            Ok(pattern) => pattern,
            Err(_) => {
                self.pos = checkpoint;
                return Ok(None);
            }
        };
        if !self.check(&TokenKind::Arrow) {
            self.pos = checkpoint;
            return Ok(None);
        }
        let pattern_span = pattern.span;
        self.advance(); // ->
        let pattern_id = self.arena.push_pattern(pattern);
        let body = self.parse_expr()?;
        let span = pattern_span.join(self.span_of(body));
        Ok(Some(self.arena.push_expr(vela_ir::ExprKind::Lambda { param: pattern_id, body, doc }, span)))
    }

    fn maybe_parse_where(&mut self, body: ExprId) -> Result<ExprId, ParseError> {
        if !self.check(&TokenKind::Keyword(Keyword::Where)) {
            return Ok(body);
        }
        self.advance();
        self.expect(&TokenKind::LBrace, "`{`")?;
        let mut bindings = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            bindings.push(self.parse_where_binding()?);
            if !self.eat(&TokenKind::Semicolon) && !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let span = self.span_of(body).join(close.span);
        let range = self.arena.push_where_bindings(bindings);
        Ok(self.arena.push_expr(vela_ir::ExprKind::Where { body, bindings: range }, span))
    }

    fn parse_where_binding(&mut self) -> Result<vela_ir::WhereBinding, ParseError> {
        let doc = self.take_doc();
        let pattern = self.parse_pattern()?;
        let pattern_id = self.arena.push_pattern(pattern);
        self.expect(&TokenKind::Eq, "`=`")?;
        let value = self.parse_expr()?;
        Ok(vela_ir::WhereBinding { pattern: pattern_id, value, doc })
    }

    fn parse_let(&mut self, doc: Option<StringId>) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // let
        let pattern = self.parse_pattern()?;
        let pattern_id = self.arena.push_pattern(pattern);
        self.expect(&TokenKind::Eq, "`=`")?;
        let value = self.parse_expr()?;
        self.expect(&TokenKind::Keyword(Keyword::In), "`in`")?;
        let body = self.parse_expr()?;
        let span = start.join(self.span_of(body));
        Ok(self.arena.push_expr(vela_ir::ExprKind::Let { pattern: pattern_id, value, body, doc }, span))
    }

    // --- binary operator precedence ladder -----------------------------------
    // pipeline < merge < or < and < equality < comparison < range
    //   < additive < multiplicative < unary < application/postfix < primary

    fn parse_pipeline(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_merge()?;
        while self.eat(&TokenKind::Backslash) {
            let rhs = self.parse_merge()?;
            lhs = self.push_binary(BinaryOp::Pipeline, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_merge(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_or()?;
        while self.eat(&TokenKind::Amp) {
            let rhs = self.parse_or()?;
            lhs = self.push_binary(BinaryOp::Merge, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat(&TokenKind::PipePipe) {
            let rhs = self.parse_and()?;
            lhs = self.push_binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_equality()?;
        while self.eat(&TokenKind::AmpAmp) {
            let rhs = self.parse_equality()?;
            lhs = self.push_binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let op = if self.eat(&TokenKind::EqEq) {
                BinaryOp::Eq
            } else if self.eat(&TokenKind::BangEq) {
                BinaryOp::Neq
            } else {
                break;
            };
            let rhs = self.parse_comparison()?;
            lhs = self.push_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_range()?;
        loop {
            let op = if self.eat(&TokenKind::Lt) {
                BinaryOp::Lt
            } else if self.eat(&TokenKind::Gt) {
                BinaryOp::Gt
            } else if self.eat(&TokenKind::Le) {
                BinaryOp::Le
            } else if self.eat(&TokenKind::Ge) {
                BinaryOp::Ge
            } else {
                break;
            };
            let rhs = self.parse_range()?;
            lhs = self.push_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_range(&mut self) -> Result<ExprId, ParseError> {
        let lhs = self.parse_additive()?;
        if self.eat(&TokenKind::DotDot) {
            let rhs = self.parse_additive()?;
            let span = self.span_join(lhs, rhs);
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Range { start: lhs, end: rhs, inclusive: false }, span));
        }
        if self.eat(&TokenKind::DotDotEq) {
            let rhs = self.parse_additive()?;
            let span = self.span_join(lhs, rhs);
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Range { start: lhs, end: rhs, inclusive: true }, span));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.eat(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let rhs = self.parse_multiplicative()?;
            lhs = self.push_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.eat(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let rhs = self.parse_unary()?;
            lhs = self.push_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        if self.check(&TokenKind::Bang) {
            let start = self.peek_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.join(self.span_of(operand));
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Unary { op: vela_ir::UnaryOp::Not, expr: operand }, span));
        }
        self.parse_application()
    }

    fn parse_application(&mut self) -> Result<ExprId, ParseError> {
        let mut func = self.parse_postfix()?;
        while self.can_start_argument() {
            let arg = self.parse_postfix()?;
            let span = self.span_join(func, arg);
            func = self.arena.push_expr(vela_ir::ExprKind::Apply { func, arg }, span);
        }
        Ok(func)
    }

    fn can_start_argument(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Ident(_)
                | TokenKind::Symbol(_)
                | TokenKind::TemplateStr(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Dot
                | TokenKind::Keyword(Keyword::True)
                | TokenKind::Keyword(Keyword::False)
                | TokenKind::Keyword(Keyword::Null)
                | TokenKind::Keyword(Keyword::Let)
                | TokenKind::Keyword(Keyword::If)
                | TokenKind::Keyword(Keyword::When)
                | TokenKind::Keyword(Keyword::Import)
        )
    }

    // --- postfix: field access/projection, indexing, object-extend ----------

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                if self.check(&TokenKind::LBrace) {
                    self.advance();
                    let names = self.parse_name_list()?;
                    let close = self.expect(&TokenKind::RBrace, "`}`")?;
                    let range = self.arena.push_name_list(names);
                    let span = self.span_of(expr).join(close.span);
                    expr = self.arena.push_expr(vela_ir::ExprKind::FieldProjection { object: expr, names: range }, span);
                } else {
                    let (name, name_span) = self.parse_field_name()?;
                    let span = self.span_of(expr).join(name_span);
                    expr = self.arena.push_expr(vela_ir::ExprKind::FieldAccess { object: expr, name, name_span }, span);
                }
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                let close = self.expect(&TokenKind::RBracket, "`]`")?;
                let span = self.span_of(expr).join(close.span);
                expr = self.arena.push_expr(vela_ir::ExprKind::Index { object: expr, index }, span);
            } else if self.check(&TokenKind::LBrace) {
                self.advance();
                let fields = self.parse_field_list(&TokenKind::RBrace)?;
                let close = self.expect(&TokenKind::RBrace, "`}`")?;
                let range = self.arena.push_fields(fields);
                let span = self.span_of(expr).join(close.span);
                expr = self.arena.push_expr(vela_ir::ExprKind::ObjectExtend { base: expr, fields: range }, span);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_field_name(&mut self) -> Result<(Name, Span), ParseError> {
        let span = self.peek_span();
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((self.interner.intern(&name), span))
            }
            other => Err(ParseError::unexpected_token(format!("expected a field name, found {other}"), span)),
        }
    }

    fn parse_name_list(&mut self) -> Result<Vec<Name>, ParseError> {
        let mut names = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            let (name, _) = self.parse_field_name()?;
            names.push(name);
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RBrace) {
                    break;
                }
                let (name, _) = self.parse_field_name()?;
                names.push(name);
            }
        }
        Ok(names)
    }

    // --- primary --------------------------------------------------------------

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let span = self.peek_span();
        match self.peek().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Ok(self.arena.push_expr(vela_ir::ExprKind::Int(n), span))
            }
            TokenKind::Float(n) => {
                self.advance();
                Ok(self.arena.push_expr(vela_ir::ExprKind::Float(n), span))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(self.arena.push_expr(vela_ir::ExprKind::Bool(true), span))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(self.arena.push_expr(vela_ir::ExprKind::Bool(false), span))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(self.arena.push_expr(vela_ir::ExprKind::Null, span))
            }
            TokenKind::Symbol(name) => {
                self.advance();
                let name = self.interner.intern(&name);
                Ok(self.arena.push_expr(vela_ir::ExprKind::Symbol(name), span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                let name = self.interner.intern(&name);
                Ok(self.arena.push_expr(vela_ir::ExprKind::Ident(name), span))
            }
            TokenKind::TemplateStr(parts) => {
                self.advance();
                self.build_string_expr(parts, span)
            }
            TokenKind::Dot => self.parse_field_accessor(),
            TokenKind::LParen => self.parse_paren(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_object(),
            TokenKind::Keyword(Keyword::Let) => self.parse_let(None),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::When) => self.parse_when_matches(),
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            _ => Err(ParseError::expected_expression(span)),
        }
    }

    fn parse_field_accessor(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        let mut names = Vec::new();
        let mut end_span = start;
        while self.check(&TokenKind::Dot) {
            self.advance();
            let (name, name_span) = self.parse_field_name()?;
            names.push(name);
            end_span = name_span;
        }
        let span = start.join(end_span);
        let range = self.arena.push_name_list(names);
        Ok(self.arena.push_expr(vela_ir::ExprKind::FieldAccessor(range), span))
    }

    fn peek_bare_operator(&self) -> Option<BinaryOp> {
        let op = match self.peek() {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::BangEq => BinaryOp::Neq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Ge => BinaryOp::Ge,
            TokenKind::Backslash => BinaryOp::Pipeline,
            TokenKind::Amp => BinaryOp::Merge,
            _ => return None,
        };
        if self.peek_at(1) == &TokenKind::RParen {
            Some(op)
        } else {
            None
        }
    }

    fn parse_paren(&mut self) -> Result<ExprId, ParseError> {
        let start = self.advance().span; // (

        if let Some(op) = self.peek_bare_operator() {
            self.advance();
            let close = self.expect(&TokenKind::RParen, "`)`")?;
            let span = start.join(close.span);
            return Ok(self.arena.push_expr(vela_ir::ExprKind::OperatorAsFunction(op), span));
        }

        let first = self.parse_expr()?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RParen) {
                    break;
                }
                items.push(self.parse_expr()?);
            }
            let close = self.expect(&TokenKind::RParen, "`)`")?;
            let span = start.join(close.span);
            let range = self.arena.push_expr_list(items);
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Tuple(range), span));
        }

        self.expect(&TokenKind::RParen, "`)`")?;
        Ok(first)
    }

    fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // if
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Keyword(Keyword::Then), "`then`")?;
        let then_branch = self.parse_expr()?;
        let (else_branch, end_span) = if self.eat(&TokenKind::Keyword(Keyword::Else)) {
            let else_expr = self.parse_expr()?;
            let end = self.span_of(else_expr);
            (Some(else_expr), end)
        } else {
            (None, self.span_of(then_branch))
        };
        let span = start.join(end_span);
        Ok(self.arena.push_expr(vela_ir::ExprKind::If { cond, then_branch, else_branch }, span))
    }

    fn parse_when_matches(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // when
        let scrutinee = self.parse_expr()?;
        self.expect(&TokenKind::Keyword(Keyword::Matches), "`matches`")?;
        self.expect(&TokenKind::LBrace, "`{`")?;

        let mut arms = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let pattern = self.parse_pattern()?;
            let pattern_id = self.arena.push_pattern(pattern);
            self.expect(&TokenKind::Arrow, "`->`")?;
            let body = self.parse_expr()?;
            arms.push(MatchArm { pattern: pattern_id, body });
            if !self.eat(&TokenKind::Semicolon) && !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let arms_range = self.arena.push_match_arms(arms);
        let mut end_span = close.span;

        let otherwise = if self.eat(&TokenKind::Keyword(Keyword::Otherwise)) {
            self.expect(&TokenKind::LBrace, "`{`")?;
            let body = self.parse_expr()?;
            let close2 = self.expect(&TokenKind::RBrace, "`}`")?;
            end_span = close2.span;
            Some(body)
        } else {
            None
        };

        let span = start.join(end_span);
        Ok(self.arena.push_expr(
            vela_ir::ExprKind::WhenMatches { scrutinee, arms: arms_range, otherwise },
            span,
        ))
    }

    fn parse_import(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // import
        let path_span = self.peek_span();
        let TokenKind::TemplateStr(parts) = self.peek().clone() else {
            return Err(ParseError::unexpected_token("expected a string literal path after `import`", path_span));
        };
        self.advance();
        let text = Self::plain_literal_text(&parts)
            .ok_or_else(|| ParseError::unexpected_token("import path cannot contain interpolation", path_span))?;
        let id = self.arena.push_string(text);
        let span = start.join(path_span);
        Ok(self.arena.push_expr(vela_ir::ExprKind::Import { path: id, path_span }, span))
    }

    // --- arrays, tuples come from parse_paren, objects, comprehensions -------

    fn parse_array(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // [

        if self.check(&TokenKind::RBracket) {
            let close = self.advance();
            let range = self.arena.push_array_elements(Vec::new());
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Array(range), start.join(close.span)));
        }

        if self.check(&TokenKind::Ellipsis) {
            return self.parse_array_tail(start, Vec::new());
        }

        let first_expr = self.parse_expr()?;
        if self.eat(&TokenKind::Keyword(Keyword::For)) {
            return self.parse_array_comp(start, first_expr);
        }
        let first_element = self.finish_array_element(first_expr)?;
        self.parse_array_tail(start, vec![first_element])
    }

    fn parse_array_tail(&mut self, start: Span, mut elements: Vec<ArrayElement>) -> Result<ExprId, ParseError> {
        if elements.is_empty() || self.check(&TokenKind::Comma) {
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                elements.push(self.parse_array_element()?);
            }
        }
        let close = self.expect(&TokenKind::RBracket, "`]`")?;
        let span = start.join(close.span);
        let range = self.arena.push_array_elements(elements);
        Ok(self.arena.push_expr(vela_ir::ExprKind::Array(range), span))
    }

    fn parse_array_element(&mut self) -> Result<ArrayElement, ParseError> {
        if self.eat(&TokenKind::Ellipsis) {
            let value = self.parse_expr()?;
            return Ok(ArrayElement { kind: ArrayElementKind::Spread, value, condition: None });
        }
        let value = self.parse_expr()?;
        self.finish_array_element(value)
    }

    fn finish_array_element(&mut self, value: ExprId) -> Result<ArrayElement, ParseError> {
        if self.eat(&TokenKind::Keyword(Keyword::If)) {
            let condition = self.parse_expr()?;
            Ok(ArrayElement { kind: ArrayElementKind::ConditionalIf, value, condition: Some(condition) })
        } else if self.eat(&TokenKind::Keyword(Keyword::Unless)) {
            let condition = self.parse_expr()?;
            Ok(ArrayElement { kind: ArrayElementKind::ConditionalUnless, value, condition: Some(condition) })
        } else {
            Ok(ArrayElement { kind: ArrayElementKind::Normal, value, condition: None })
        }
    }

    fn parse_array_comp(&mut self, start: Span, body: ExprId) -> Result<ExprId, ParseError> {
        let clauses = self.parse_for_clauses()?;
        let filter = self.parse_optional_filter()?;
        let close = self.expect(&TokenKind::RBracket, "`]`")?;
        let span = start.join(close.span);
        let range = self.arena.push_for_clauses(clauses);
        Ok(self.arena.push_expr(vela_ir::ExprKind::ArrayComp { body, clauses: range, filter }, span))
    }

    fn parse_for_clauses(&mut self) -> Result<Vec<ForClause>, ParseError> {
        let mut clauses = vec![self.parse_for_clause()?];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::Keyword(Keyword::If)) {
                break;
            }
            clauses.push(self.parse_for_clause()?);
        }
        Ok(clauses)
    }

    fn parse_for_clause(&mut self) -> Result<ForClause, ParseError> {
        let start = self.peek_span();
        let pattern = self.parse_pattern()?;
        let pattern_id = self.arena.push_pattern(pattern);
        self.expect(&TokenKind::LArrow, "`<-`")?;
        let iterable = self.parse_expr()?;
        let span = start.join(self.span_of(iterable));
        Ok(ForClause { pattern: pattern_id, iterable, span })
    }

    fn parse_optional_filter(&mut self) -> Result<Option<ExprId>, ParseError> {
        if self.eat(&TokenKind::Keyword(Keyword::If)) {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_object(&mut self) -> Result<ExprId, ParseError> {
        let start = self.peek_span();
        self.advance(); // {

        if self.check(&TokenKind::RBrace) {
            let close = self.advance();
            let range = self.arena.push_fields(Vec::new());
            return Ok(self.arena.push_expr(vela_ir::ExprKind::Object(range), start.join(close.span)));
        }

        let checkpoint = self.pos;
        if let Some(comp) = self.try_parse_object_comp(start)? {
            return Ok(comp);
        }
        self.pos = checkpoint;

        let fields = self.parse_field_list(&TokenKind::RBrace)?;
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let span = start.join(close.span);
        let range = self.arena.push_fields(fields);
        Ok(self.arena.push_expr(vela_ir::ExprKind::Object(range), span))
    }

    fn try_parse_object_comp(&mut self, start: Span) -> Result<Option<ExprId>, ParseError> {
        let key = match self.parse_expr() {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };
        if !self.eat(&TokenKind::Colon) {
            return Ok(None);
        }
        let value = match self.parse_expr() {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };
        if !self.eat(&TokenKind::Keyword(Keyword::For)) {
            return Ok(None);
        }
        let clauses = self.parse_for_clauses()?;
        let filter = self.parse_optional_filter()?;
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let span = start.join(close.span);
        let range = self.arena.push_for_clauses(clauses);
        Ok(Some(self.arena.push_expr(vela_ir::ExprKind::ObjectComp { key, value, clauses: range, filter }, span)))
    }

    fn parse_field_list(&mut self, close: &TokenKind) -> Result<Vec<Field>, ParseError> {
        let mut fields = Vec::new();
        while !self.check(close) {
            fields.push(self.parse_field()?);
            if !self.eat(&TokenKind::Comma) && !self.eat(&TokenKind::Semicolon) {
                break;
            }
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let doc = self.take_doc();
        let (key, key_span) = self.parse_field_key()?;

        if self.check(&TokenKind::LBrace) {
            self.advance();
            let fields = self.parse_field_list(&TokenKind::RBrace)?;
            let close = self.expect(&TokenKind::RBrace, "`}`")?;
            let range = self.arena.push_fields(fields);
            let span = key_span.join(close.span);
            let value = self.arena.push_expr(vela_ir::ExprKind::Object(range), span);
            Ok(Field { key, key_span, value, is_patch: true, doc })
        } else {
            self.expect(&TokenKind::Colon, "`:`")?;
            let value = self.parse_expr()?;
            Ok(Field { key, key_span, value, is_patch: false, doc })
        }
    }

    fn parse_field_key(&mut self) -> Result<(FieldKey, Span), ParseError> {
        let span = self.peek_span();
        if self.eat(&TokenKind::LBracket) {
            let expr = self.parse_expr()?;
            let close = self.expect(&TokenKind::RBracket, "`]`")?;
            return Ok((FieldKey::Dynamic(expr), span.join(close.span)));
        }
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                let id = self.arena.push_string(name);
                Ok((FieldKey::Static(id), span))
            }
            TokenKind::TemplateStr(parts) => {
                self.advance();
                let text = Self::plain_literal_text(&parts)
                    .ok_or_else(|| ParseError::unexpected_token("an interpolated string cannot be a field key", span))?;
                let id = self.arena.push_string(text);
                Ok((FieldKey::Static(id), span))
            }
            other => Err(ParseError::unexpected_token(format!("expected a field key, found {other}"), span)),
        }
    }

    // --- string interpolation --------------------------------------------------

    fn build_string_expr(&mut self, parts: Vec<RawPart>, span: Span) -> Result<ExprId, ParseError> {
        if parts.len() == 1 {
            if let RawPart::Literal(text) = &parts[0] {
                let id = self.arena.push_string(text.clone());
                return Ok(self.arena.push_expr(vela_ir::ExprKind::Str(id), span));
            }
        }

        let mut template_parts = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                RawPart::Literal(text) => {
                    let id = self.arena.push_string(text);
                    template_parts.push(TemplatePart::Literal(id));
                }
                RawPart::Expr { source, start_offset } => {
                    let expr = self.parse_sub_expr(&source, start_offset)?;
                    template_parts.push(TemplatePart::Expr(expr));
                }
            }
        }
        let range = self.arena.push_template_parts(template_parts);
        Ok(self.arena.push_expr(vela_ir::ExprKind::Interp(range), span))
    }

    /// Re-lexes and parses a `${...}` slice in place, pushing into the
    /// same arena the enclosing `parse()` call owns. Swaps the token
    /// stream rather than recursing into a whole new `Parser` so there
    /// is never more than one arena alive for a module.
    fn parse_sub_expr(&mut self, source: &str, base_offset: u32) -> Result<ExprId, ParseError> {
        let sub_tokens = Lexer::new(source, base_offset).tokenize()?;
        let saved_tokens = std::mem::replace(&mut self.tokens, sub_tokens);
        let saved_pos = self.pos;
        self.pos = 0;

        let result = self.parse_expr();
        let trailing_ok = result.is_ok() && matches!(self.peek(), TokenKind::Eof);

        self.tokens = saved_tokens;
        self.pos = saved_pos;

        let expr = result?;
        if !trailing_ok {
            let end = base_offset + source.len() as u32;
            return Err(ParseError::unexpected_token(
                "unexpected trailing tokens in string interpolation",
                Span::new(base_offset, end),
            ));
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use vela_ir::{ExprId, ExprKind, StringInterner, TemplatePart};

    use super::parse_module;

    fn parse_ok(source: &str) -> (vela_ir::SharedArena, ExprId) {
        let interner = Rc::new(StringInterner::new());
        parse_module(source, &interner).unwrap_or_else(|err| panic!("expected {source:?} to parse, got {err}"))
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let (arena, root) = parse_ok("1 + 2 * 3");
        match arena.kind(root) {
            ExprKind::Binary { op: vela_ir::BinaryOp::Add, rhs, .. } => {
                assert!(matches!(arena.kind(*rhs), ExprKind::Binary { op: vela_ir::BinaryOp::Mul, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn parses_let_in() {
        let (arena, root) = parse_ok("let x = 1 in x + 2");
        assert!(matches!(arena.kind(root), ExprKind::Let { .. }));
    }

    #[test]
    fn parses_lambda_and_application() {
        let (arena, root) = parse_ok("(x -> x + 1) 5");
        match arena.kind(root) {
            ExprKind::Apply { func, .. } => {
                assert!(matches!(arena.kind(*func), ExprKind::Lambda { .. }));
            }
            other => panic!("expected Apply, got {other:?}"),
        }
    }

    #[test]
    fn parses_where_suffix() {
        let (arena, root) = parse_ok("x + y where { x = 1; y = 2 }");
        match arena.kind(root) {
            ExprKind::Where { bindings, .. } => assert_eq!(arena.where_bindings(*bindings).len(), 2),
            other => panic!("expected Where, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_then_else() {
        let (arena, root) = parse_ok("if true then 1 else 2");
        assert!(matches!(arena.kind(root), ExprKind::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn parses_if_without_else() {
        let (arena, root) = parse_ok("if true then 1");
        assert!(matches!(arena.kind(root), ExprKind::If { else_branch: None, .. }));
    }

    #[test]
    fn parses_when_matches_with_otherwise() {
        let (arena, root) = parse_ok("when x matches { 1 -> \"one\"; n -> \"n\" } otherwise { \"other\" }");
        match arena.kind(root) {
            ExprKind::WhenMatches { arms, otherwise, .. } => {
                assert_eq!(arena.match_arms(*arms).len(), 2);
                assert!(otherwise.is_some());
            }
            other => panic!("expected WhenMatches, got {other:?}"),
        }
    }

    #[test]
    fn parses_array_with_spread_and_conditional() {
        let (arena, root) = parse_ok("[1, ...xs, 2 if cond, 3 unless cond]");
        match arena.kind(root) {
            ExprKind::Array(range) => {
                let elements = arena.array_elements(*range);
                assert_eq!(elements.len(), 4);
                assert_eq!(elements[1].kind, vela_ir::ArrayElementKind::Spread);
                assert_eq!(elements[2].kind, vela_ir::ArrayElementKind::ConditionalIf);
                assert_eq!(elements[3].kind, vela_ir::ArrayElementKind::ConditionalUnless);
            }
            other => panic!("expected Array, got {other:?}"),
        }
    }

    #[test]
    fn parses_array_comprehension() {
        let (arena, root) = parse_ok("[x * 2 for x <- 1..=10 if x != 5]");
        match arena.kind(root) {
            ExprKind::ArrayComp { clauses, filter, .. } => {
                assert_eq!(arena.for_clauses(*clauses).len(), 1);
                assert!(filter.is_some());
            }
            other => panic!("expected ArrayComp, got {other:?}"),
        }
    }

    #[test]
    fn parses_object_literal_with_patch_and_dynamic_key() {
        let (arena, root) = parse_ok("{ name: \"a\", nested { x: 1 }, [dynKey]: 2 }");
        match arena.kind(root) {
            ExprKind::Object(range) => {
                let fields = arena.fields(*range);
                assert_eq!(fields.len(), 3);
                assert!(!fields[0].is_patch);
                assert!(fields[1].is_patch);
                assert!(matches!(fields[2].key, vela_ir::FieldKey::Dynamic(_)));
            }
            other => panic!("expected Object, got {other:?}"),
        }
    }

    #[test]
    fn parses_object_comprehension() {
        let (arena, root) = parse_ok("{ k: v for (k, v) <- pairs }");
        assert!(matches!(arena.kind(root), ExprKind::ObjectComp { .. }));
    }

    #[test]
    fn parses_object_extend_over_base() {
        let (arena, root) = parse_ok("base { x: 1 }");
        match arena.kind(root) {
            ExprKind::ObjectExtend { base, .. } => assert!(matches!(arena.kind(*base), ExprKind::Ident(_))),
            other => panic!("expected ObjectExtend, got {other:?}"),
        }
    }

    #[test]
    fn parses_field_access_projection_and_accessor() {
        let (arena, root) = parse_ok("obj.a.{b, c}");
        assert!(matches!(arena.kind(root), ExprKind::FieldProjection { .. }));

        let (arena, root) = parse_ok(".a.b");
        assert!(matches!(arena.kind(root), ExprKind::FieldAccessor(_)));
    }

    #[test]
    fn parses_operator_as_function() {
        let (arena, root) = parse_ok("(+)");
        assert!(matches!(arena.kind(root), ExprKind::OperatorAsFunction(vela_ir::BinaryOp::Add)));
    }

    #[test]
    fn parses_tuple_and_grouping() {
        let (arena, root) = parse_ok("(1, 2, 3)");
        assert!(matches!(arena.kind(root), ExprKind::Tuple(_)));

        let (arena, root) = parse_ok("(1 + 2)");
        assert!(matches!(arena.kind(root), ExprKind::Binary { .. }));
    }

    #[test]
    fn parses_import() {
        let (arena, root) = parse_ok("import \"./lib.vela\"");
        assert!(matches!(arena.kind(root), ExprKind::Import { .. }));
    }

    #[test]
    fn parses_string_interpolation() {
        let (arena, root) = parse_ok("\"sum: ${1 + 2}\"");
        match arena.kind(root) {
            ExprKind::Interp(range) => {
                let parts = arena.template_parts(*range);
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], TemplatePart::Literal(_)));
                assert!(matches!(parts[1], TemplatePart::Expr(_)));
            }
            other => panic!("expected Interp, got {other:?}"),
        }
    }

    #[test]
    fn nested_braces_inside_interpolation_do_not_end_it_early() {
        let (arena, root) = parse_ok("\"${ {a: 1}.a }\"");
        match arena.kind(root) {
            ExprKind::Interp(range) => {
                let parts = arena.template_parts(*range);
                assert_eq!(parts.len(), 1);
            }
            other => panic!("expected Interp, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_token_is_an_error() {
        let interner = Rc::new(StringInterner::new());
        let err = parse_module("1 +", &interner).unwrap_err();
        assert_eq!(err.code, vela_diagnostic::ErrorCode::E1002);
    }
}
