//! Lexer and parser turning Vela source text into a [`vela_ir::SharedArena`].
//!
//! The public surface is deliberately one function: `parse`. Everything
//! else -- the token stream, the precedence ladder, pattern parsing --
//! is an implementation detail `vela_eval`'s module loader never touches.

mod error;
mod lexer;
mod parser;

use std::rc::Rc;

use vela_ir::{ExprId, SharedArena, StringInterner};

pub use error::ParseError;

/// Parses one module's source text into a fresh arena and the
/// [`ExprId`] of its root expression.
pub fn parse(source: &str, interner: &Rc<StringInterner>) -> Result<(SharedArena, ExprId), ParseError> {
    parser::parse_module(source, interner)
}
