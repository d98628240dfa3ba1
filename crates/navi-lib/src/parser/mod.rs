//! Navi source syntax.
//!
//! Two entry points:
//! - [`parse_expression`] for a single type expression
//! - [`parse_definitions`] for a file of `struct` and `let` definitions
//!
//! The parser is a hand-written recursive descent over the token stream
//! from [`lexer::lex`]. It stops at the first error; nesting deeper than
//! [`MAX_DEPTH`] is reported as an error rather than overflowing the stack.

pub mod lexer;

mod grammar;


use std::ops::Range;

use crate::expression::Expression;
use crate::typedef::TypeDefinitions;

pub use grammar::MAX_DEPTH;

/// A syntax error with the byte span it refers to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}..{}", .span.start, .span.end)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Parses a complete expression.
pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    grammar::Parser::new(source).parse_expression_source()
}

/// Parses definitions and adds them to `defs` in source order.
///
/// Redefinitions are reported at the offending name.
pub fn parse_definitions(source: &str, defs: &mut TypeDefinitions) -> Result<(), ParseError> {
    grammar::Parser::new(source).parse_definitions_source(defs)
}
