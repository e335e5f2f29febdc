//! Token definitions.
//!
//! The program text format is whitespace separated; the only punctuation is the
//! label marker and the array-length brackets of the Data segment.
use crate::Span;

/// Token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare word: keywords, types, mnemonics, variable names.
    Word,
    /// Numeric literal (always read as a float).
    Number,
    /// Double-quoted string literal.
    Str,
    /// `:` label marker.
    Colon,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// End of input.
    Eof,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Colon => "':'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
