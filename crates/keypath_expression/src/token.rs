//! Token types for Keypath expressions.
//!
//! Tokens are the output of the lexer and input to the parser.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token types for Keypath expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `.`
    Dot,
    /// `,`
    Comma,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `===`
    EqEqEq,
    /// `!==`
    NotEqEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,

    // Literals
    /// Number literal like `42`, `1.5` or `2e3`
    Number(f64),
    /// String literal like `"hello"` or `'hello'`
    String(String),
    /// Identifier like `arr` or `getQueryParam`
    Ident(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `this`
    This,

    // Meta
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns the identifier text for tokens usable as a property name.
    ///
    /// Reserved words are valid after `.`, so `x.null` reads property
    /// `"null"`.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            Self::True => Some("true"),
            Self::False => Some("false"),
            Self::Null => Some("null"),
            Self::Undefined => Some("undefined"),
            Self::This => Some("this"),
            _ => None,
        }
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Dot => "'.'",
            Self::Comma => "','",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Bang => "'!'",
            Self::Less => "'<'",
            Self::LessEq => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEq => "'>='",
            Self::EqEq => "'=='",
            Self::NotEq => "'!='",
            Self::EqEqEq => "'==='",
            Self::NotEqEq => "'!=='",
            Self::AndAnd => "'&&'",
            Self::OrOr => "'||'",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Ident(_) => "identifier",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::This => "this",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
