//! Lexer for Navi source.
//!
//! Tokens carry spans only; text is sliced from the source on demand.
//! Consecutive unrecognized characters are coalesced into one `Garbage`
//! token so malformed input yields a single error.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Equals,

    #[token("=>")]
    FatArrow,

    #[token("|")]
    Pipe,

    #[token("&")]
    Ampersand,

    #[token(".")]
    Dot,

    /// Range separator. Defined alongside `Dot`; the longer match wins.
    #[token("..")]
    DotDot,

    #[token("-")]
    Minus,

    #[token("_")]
    Underscore,

    #[regex(r"[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    String,

    #[token("inf")]
    KwInf,

    #[token("NaN")]
    KwNaN,

    #[token("int")]
    KwInt,

    #[token("number")]
    KwNumber,

    #[token("string")]
    KwString,

    #[token("never")]
    KwNever,

    #[token("any")]
    KwAny,

    #[token("match")]
    KwMatch,

    #[token("as")]
    KwAs,

    #[token("struct")]
    KwStruct,

    #[token("let")]
    KwLet,

    /// Defined after keywords so they take precedence. A lone `_` is
    /// `Underscore`.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*|_[A-Za-z0-9_]+")]
    Ident,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::LineComment)
    }

    /// How the token is spelled in messages.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            ParenOpen => "`(`",
            ParenClose => "`)`",
            BraceOpen => "`{`",
            BraceClose => "`}`",
            Comma => "`,`",
            Colon => "`:`",
            Semicolon => "`;`",
            Equals => "`=`",
            FatArrow => "`=>`",
            Pipe => "`|`",
            Ampersand => "`&`",
            Dot => "`.`",
            DotDot => "`..`",
            Minus => "`-`",
            Underscore => "`_`",
            Number => "number literal",
            String => "string literal",
            KwInf => "`inf`",
            KwNaN => "`NaN`",
            KwInt => "`int`",
            KwNumber => "`number`",
            KwString => "`string`",
            KwNever => "`never`",
            KwAny => "`any`",
            KwMatch => "`match`",
            KwAs => "`as`",
            KwStruct => "`struct`",
            KwLet => "`let`",
            Ident => "identifier",
            Whitespace => "whitespace",
            LineComment => "comment",
            Garbage => "unrecognized input",
        }
    }
}

/// Zero-copy token: kind + byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenizes `source`, dropping trivia.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..lexer.span().start,
                    });
                }
                if !kind.is_trivia() {
                    tokens.push(Token {
                        kind,
                        span: lexer.span(),
                    });
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.clone()]
}
