//! Recursive-descent grammar.
//!
//! ```text
//! expr     = inter ("|" inter)*
//! inter    = postfix ("&" postfix)*
//! postfix  = primary ("." ident)*
//! primary  = number [".." number] | string | "int" ["(" number ".." number ")"]
//!          | "number" | "string" | "never" | "any" | "_"
//!          | ident ["(" args ")" | "{" fields "}"]
//!          | "match" expr "{" arm ("," arm)* [","] "}"
//!          | "(" expr ")"
//! arm      = expr ["as" ident] "=>" expr
//! number   = ["-"] (digits | "inf") | "NaN"
//!
//! file     = (struct | let)*
//! struct   = "struct" ident (";" | "{" [ident ":" expr ("," ident ":" expr)* [","]] "}")
//! let      = "let" ident "=" expr ";"
//! ```

use std::ops::Range;

use navi_core::Type;

use super::ParseError;
use super::lexer::{Token, TokenKind, lex, token_text};
use crate::expression::{Expression, MatchArm};
use crate::typedef::TypeDefinitions;

/// Maximum nesting of expressions.
pub const MAX_DEPTH: u32 = 256;

type Result<T> = std::result::Result<T, ParseError>;

pub(super) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    /// Set while parsing a match scrutinee, where `{` opens the arms.
    no_struct_literal: bool,
}

impl<'src> Parser<'src> {
    pub(super) fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
            depth: 0,
            no_struct_literal: false,
        }
    }

    pub(super) fn parse_expression_source(mut self) -> Result<Expression> {
        let expr = self.parse_expr()?;
        if !self.eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    pub(super) fn parse_definitions_source(mut self, defs: &mut TypeDefinitions) -> Result<()> {
        while !self.eof() {
            match self.current() {
                Some(TokenKind::KwStruct) => self.parse_struct(defs)?,
                Some(TokenKind::KwLet) => self.parse_let(defs)?,
                _ => return Err(self.unexpected("`struct` or `let`")),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Token access
    // ========================================================================

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len()..self.source.len(), |t| t.span.clone())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Range<usize>> {
        if self.at(kind) {
            let span = self.current_span();
            self.pos += 1;
            return Ok(span);
        }
        Err(self.unexpected(kind.describe()))
    }

    fn expect_ident(&mut self) -> Result<(String, Range<usize>)> {
        let span = self.expect(TokenKind::Ident)?;
        Ok((self.source[span.clone()].to_owned(), span))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let message = match self.tokens.get(self.pos) {
            None => format!("expected {expected}, found end of input"),
            Some(token) if token.kind == TokenKind::Garbage => {
                format!("unrecognized input `{}`", token_text(self.source, token))
            }
            Some(token) => format!("expected {expected}, found {}", token.kind.describe()),
        };
        ParseError::new(message, self.current_span())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::new(
                "expression nested too deeply",
                self.current_span(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    fn parse_struct(&mut self, defs: &mut TypeDefinitions) -> Result<()> {
        self.expect(TokenKind::KwStruct)?;
        let (name, name_span) = self.expect_ident()?;

        let mut fields = Vec::new();
        if !self.eat(TokenKind::Semicolon) {
            self.expect(TokenKind::BraceOpen)?;
            while !self.at(TokenKind::BraceClose) {
                let (field, _) = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                fields.push((field, self.parse_expr()?));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::BraceClose)?;
        }

        defs.add_struct(name, fields)
            .map_err(|err| ParseError::new(err.to_string(), name_span))
    }

    fn parse_let(&mut self, defs: &mut TypeDefinitions) -> Result<()> {
        self.expect(TokenKind::KwLet)?;
        let (name, name_span) = self.expect_ident()?;
        self.expect(TokenKind::Equals)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        defs.add_alias(name, expr)
            .map_err(|err| ParseError::new(err.to_string(), name_span))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expr(&mut self) -> Result<Expression> {
        self.enter()?;
        let result = self.parse_union();
        self.depth -= 1;
        result
    }

    fn parse_union(&mut self) -> Result<Expression> {
        let first = self.parse_intersection()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Pipe) {
            items.push(self.parse_intersection()?);
        }
        Ok(Expression::Union(items))
    }

    fn parse_intersection(&mut self) -> Result<Expression> {
        let first = self.parse_postfix()?;
        if !self.at(TokenKind::Ampersand) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Ampersand) {
            items.push(self.parse_postfix()?);
        }
        Ok(Expression::Intersection(items))
    }

    fn parse_postfix(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;
        while self.eat(TokenKind::Dot) {
            let (field, _) = self.expect_ident()?;
            expr = Expression::field(expr, field);
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let Some(kind) = self.current() else {
            return Err(self.unexpected("expression"));
        };

        match kind {
            TokenKind::Number | TokenKind::Minus | TokenKind::KwInf | TokenKind::KwNaN => {
                self.parse_number_or_range()
            }
            TokenKind::String => self.parse_string(),
            TokenKind::KwInt => self.parse_int(),
            TokenKind::KwNumber => self.keyword(Type::number()),
            TokenKind::KwString => self.keyword(Type::string()),
            TokenKind::KwNever => self.keyword(Type::Never),
            TokenKind::KwAny | TokenKind::Underscore => self.keyword(Type::Any),
            TokenKind::KwMatch => self.parse_match(),
            TokenKind::Ident => self.parse_named(),
            TokenKind::ParenOpen => {
                self.pos += 1;
                let outer = std::mem::replace(&mut self.no_struct_literal, false);
                let expr = self.parse_expr();
                self.no_struct_literal = outer;
                let expr = expr?;
                self.expect(TokenKind::ParenClose)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn keyword(&mut self, ty: Type) -> Result<Expression> {
        self.pos += 1;
        Ok(Expression::Type(ty))
    }

    /// `["-"] (digits | "inf") | "NaN"`
    fn parse_number(&mut self) -> Result<f64> {
        let negative = self.eat(TokenKind::Minus);
        let span = self.current_span();
        let value = match self.current() {
            Some(TokenKind::Number) => {
                let text = &self.source[span.clone()];
                text.parse::<f64>()
                    .map_err(|_| ParseError::new("invalid number", span.clone()))?
            }
            Some(TokenKind::KwInf) => f64::INFINITY,
            Some(TokenKind::KwNaN) if !negative => f64::NAN,
            _ => return Err(self.unexpected("number")),
        };
        self.pos += 1;
        Ok(if negative { -value } else { value })
    }

    fn parse_number_or_range(&mut self) -> Result<Expression> {
        let start = self.current_span().start;
        let min = self.parse_number()?;
        if !self.eat(TokenKind::DotDot) {
            return Ok(Expression::Type(Type::literal(min)));
        }
        let max = self.parse_number()?;
        let span = start..self.tokens[self.pos - 1].span.end;
        range_bounds(min, max, span)?;
        Ok(Expression::Type(Type::interval(min, max)))
    }

    /// `int` or `int(min..max)`
    fn parse_int(&mut self) -> Result<Expression> {
        self.expect(TokenKind::KwInt)?;
        if !self.at(TokenKind::ParenOpen) {
            return Ok(Expression::Type(Type::int()));
        }
        let open = self.expect(TokenKind::ParenOpen)?;
        let min = self.parse_number()?;
        self.expect(TokenKind::DotDot)?;
        let max = self.parse_number()?;
        let close = self.expect(TokenKind::ParenClose)?;
        range_bounds(min, max, open.start..close.end)?;
        Ok(Expression::Type(Type::int_interval(min, max)))
    }

    fn parse_string(&mut self) -> Result<Expression> {
        let span = self.expect(TokenKind::String)?;
        let raw = &self.source[span.start + 1..span.end - 1];
        let value = unescape(raw).map_err(|escape| {
            let at = span.start + 1;
            ParseError::new("unknown escape sequence", at + escape.start..at + escape.end)
        })?;
        Ok(Expression::Type(Type::string_literal(value)))
    }

    /// `name`, `name(args)` or `Name { field: expr, .. }`
    fn parse_named(&mut self) -> Result<Expression> {
        let (name, _) = self.expect_ident()?;

        if self.eat(TokenKind::ParenOpen) {
            let mut args = Vec::new();
            while !self.at(TokenKind::ParenClose) {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::ParenClose)?;
            return Ok(Expression::call(name, args));
        }

        if self.no_struct_literal || !self.at(TokenKind::BraceOpen) {
            return Ok(Expression::named(name));
        }

        self.expect(TokenKind::BraceOpen)?;
        let mut fields = Vec::new();
        while !self.at(TokenKind::BraceClose) {
            let (field, _) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            fields.push((field, self.parse_expr()?));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::BraceClose)?;
        Ok(Expression::Named {
            name,
            fields: Some(fields),
        })
    }

    fn parse_match(&mut self) -> Result<Expression> {
        self.expect(TokenKind::KwMatch)?;

        let outer = std::mem::replace(&mut self.no_struct_literal, true);
        let of = self.parse_expr();
        self.no_struct_literal = outer;
        let of = of?;

        self.expect(TokenKind::BraceOpen)?;
        let mut arms = Vec::new();
        while !self.at(TokenKind::BraceClose) {
            arms.push(self.parse_arm()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::BraceClose)?;
        Ok(Expression::match_of(of, arms))
    }

    fn parse_arm(&mut self) -> Result<MatchArm> {
        let pattern = self.parse_expr()?;
        let binding = if self.eat(TokenKind::KwAs) {
            Some(self.expect_ident()?.0)
        } else {
            None
        };
        self.expect(TokenKind::FatArrow)?;
        let to = self.parse_expr()?;
        Ok(MatchArm {
            pattern,
            binding,
            to,
        })
    }
}

fn range_bounds(min: f64, max: f64, span: Range<usize>) -> Result<()> {
    if min.is_nan() || max.is_nan() {
        return Err(ParseError::new("range bounds cannot be NaN", span));
    }
    if min > max {
        return Err(ParseError::new("range is empty", span));
    }
    Ok(())
}

/// Resolves `\"`, `\\`, `\n`, `\r` and `\t`. On failure returns the byte
/// range of the offending escape within `raw`.
fn unescape(raw: &str) -> std::result::Result<String, Range<usize>> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some((_, '"')) => '"',
            Some((_, '\\')) => '\\',
            Some((_, 'n')) => '\n',
            Some((_, 'r')) => '\r',
            Some((_, 't')) => '\t',
            Some((_, other)) => return Err(i..i + 1 + other.len_utf8()),
            None => return Err(i..i + 1),
        };
        out.push(escaped);
    }
    Ok(out)
}
