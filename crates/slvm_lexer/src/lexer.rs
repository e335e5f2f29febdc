//! Lexer implementation.
//!
//! Scans compiled program text into words, numbers, strings and the few
//! punctuation tokens the format uses. Newlines carry no meaning; `#` starts a
//! comment that runs to the end of the line.
//!
//! Design: single linear pass, no allocation besides the token vector.
use slvm_syntax::{
    Diagnostic, DiagnosticKind, Span, Token, TokenKind, is_ident_continue, is_ident_start,
};

/// Lexing result.
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Program text lexer.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    i: usize,
    diagnostics: Vec<Diagnostic>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            i: 0,
            diagnostics: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Run the lexer and return tokens + diagnostics.
    pub fn lex(mut self) -> LexResult {
        let approx = self.bytes.len().saturating_div(5).max(32);
        self.tokens.reserve(approx);
        while let Some(c) = self.peek_char() {
            let start = self.i;
            match c {
                c if c.is_whitespace() => {
                    self.i += c.len_utf8();
                }
                '#' => {
                    while let Some(ch) = self.peek_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.i += ch.len_utf8();
                    }
                }
                ':' => {
                    self.i += 1;
                    self.push(TokenKind::Colon, start);
                }
                '[' => {
                    self.i += 1;
                    self.push(TokenKind::LBracket, start);
                }
                ']' => {
                    self.i += 1;
                    self.push(TokenKind::RBracket, start);
                }
                '"' => self.lex_string(),
                '-' | '+' | '.' if self.number_follows_sign() => self.lex_number(),
                c if c.is_ascii_digit() => self.lex_number(),
                c if is_ident_start(c) => self.lex_word(),
                other => {
                    self.i += other.len_utf8();
                    self.diagnostics.push(Diagnostic::error_kind(
                        &DiagnosticKind::UnexpectedChar(other),
                        Some(Span::new(start as u32, self.i as u32)),
                    ));
                }
            }
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::point(self.i as u32),
        });

        LexResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(start as u32, self.i as u32),
        });
    }

    /// `-`, `+` and `.` only start a number when a digit (or `.digit`) follows.
    fn number_follows_sign(&self) -> bool {
        let rest = &self.bytes[self.i..];
        match rest {
            [b'.', d, ..] => d.is_ascii_digit(),
            [b'-' | b'+', d, ..] if d.is_ascii_digit() => true,
            [b'-' | b'+', b'.', d, ..] => d.is_ascii_digit(),
            _ => false,
        }
    }

    fn lex_string(&mut self) {
        let start = self.i;
        self.i += 1;
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            if ch == '"' {
                self.i += 1;
                self.push(TokenKind::Str, start);
                return;
            }
            self.i += ch.len_utf8();
            if ch == '\\' {
                if let Some(esc) = self.peek_char() {
                    self.i += esc.len_utf8();
                }
            }
        }
        self.diagnostics.push(Diagnostic::error_kind(
            &DiagnosticKind::UnterminatedString,
            Some(Span::new(start as u32, self.i as u32)),
        ));
    }

    fn lex_number(&mut self) {
        let start = self.i;
        if matches!(self.peek_char(), Some('-' | '+')) {
            self.i += 1;
        }
        self.eat_digits();
        if self.peek_char() == Some('.') {
            self.i += 1;
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let exp_start = self.i;
            self.i += 1;
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.i += 1;
            }
            if self.eat_digits() == 0 {
                self.i = exp_start;
            }
        }
        // A number glued to letters (`1abc`) is malformed rather than two tokens.
        if self.peek_char().is_some_and(is_ident_continue) {
            while self.peek_char().is_some_and(is_ident_continue) {
                self.i += 1;
            }
            self.diagnostics.push(Diagnostic::error_kind(
                &DiagnosticKind::InvalidNumber(self.input[start..self.i].to_string()),
                Some(Span::new(start as u32, self.i as u32)),
            ));
            return;
        }
        self.push(TokenKind::Number, start);
    }

    fn eat_digits(&mut self) -> usize {
        let mut n = 0;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.i += 1;
            n += 1;
        }
        n
    }

    fn lex_word(&mut self) {
        let start = self.i;
        while self.peek_char().is_some_and(is_ident_continue) {
            self.i += 1;
        }
        self.push(TokenKind::Word, start);
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.i..].chars().next()
    }
}
