use logos::Logos;
use std::ops::Range;

/// Kinds of tokens in expressions and binding lists.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    /// Separates a name from its value in a binding.
    #[token("=")]
    Assign,

    /// Separates bindings.
    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A run of decimal digits: a coefficient, a constant or an exponent.
    #[regex(r"[0-9]+")]
    Int,

    /// A variable name. Names are always a single lowercase letter; `ab` is two names.
    #[regex(r"[a-z]")]
    Name,

    /// Any other single character.
    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if the token is one of the binary operators `+`, `-` or `*`.
    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::Add | TokenKind::Sub | TokenKind::Mul)
    }
}

/// A token along with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// Byte range of the token in the source.
    pub span: Range<usize>,

    pub kind: TokenKind,

    /// The text of the token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token is whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Returns true if the token is one of the binary operators `+`, `-` or `*`.
    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }
}
