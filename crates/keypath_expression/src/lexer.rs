//! Lexer for Keypath expressions.
//!
//! The lexer converts expression text into a stream of tokens.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for expression source text.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            );
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '.' => {
                if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            '<' => self.with_eq(TokenKind::Less, TokenKind::LessEq),
            '>' => self.with_eq(TokenKind::Greater, TokenKind::GreaterEq),
            '!' => {
                self.advance();
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::NotEqEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                self.advance();
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else {
                    TokenKind::Error("assignment is not supported".into())
                }
            }
            '&' => self.doubled('&', TokenKind::AndAnd),
            '|' => self.doubled('|', TokenKind::OrOr),
            '"' | '\'' => self.scan_string(c),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => self.scan_ident(),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes `expected` if it is next.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn with_eq(&mut self, bare: TokenKind, with_eq: TokenKind) -> TokenKind {
        self.advance();
        if self.eat('=') { with_eq } else { bare }
    }

    fn doubled(&mut self, c: char, kind: TokenKind) -> TokenKind {
        self.advance();
        if self.eat(c) {
            kind
        } else {
            TokenKind::Error(format!("bitwise operator '{c}' is not supported"))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a string literal delimited by `quote`.
    fn scan_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // consume opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.peek_char() else {
                        return TokenKind::Error("unexpected end of input in string escape".into());
                    };
                    self.advance();
                    match escaped {
                        'n' => text.push('\n'),
                        'r' => text.push('\r'),
                        't' => text.push('\t'),
                        '0' => text.push('\0'),
                        'u' => match self.scan_unicode_escape() {
                            Some(c) => text.push(c),
                            None => return TokenKind::Error("invalid unicode escape".into()),
                        },
                        // Any other escaped character stands for itself.
                        other => text.push(other),
                    }
                }
                Some('\n') | None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans the four hex digits of a `\uXXXX` escape.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        let digits = self.rest.get(..4)?;
        let code = u32::from_str_radix(digits, 16).ok()?;
        for _ in 0..4 {
            self.advance();
        }
        char::from_u32(code)
    }

    /// Scans a decimal number with optional fraction and exponent.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;

        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char_n(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char_n(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        if self.peek_char().is_some_and(is_ident_start) {
            return TokenKind::Error("identifier starts immediately after numeric literal".into());
        }

        let text = &self.source[start..self.position];
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(e) => TokenKind::Error(format!("invalid number: {e}")),
        }
    }

    /// Scans an identifier or reserved word.
    fn scan_ident(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_ident_char) {
            self.advance();
        }

        match &self.source[start..self.position] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            "this" => TokenKind::This,
            name => TokenKind::Ident(name.to_string()),
        }
    }
}

/// Returns true if `c` can start an identifier.
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Returns true if `c` can continue an identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Returns true if `name` is a valid identifier that is not a reserved word.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_ident_start)
        && chars.all(is_ident_char)
        && !matches!(name, "true" | "false" | "null" | "undefined" | "this")
}
