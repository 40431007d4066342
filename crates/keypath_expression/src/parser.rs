//! Parser for Keypath expressions.
//!
//! Precedence climbing over the lexer's token stream, loosest first:
//! `||`, `&&`, equality, relational, additive, multiplicative, prefix,
//! then postfix member/index/call chains.

use keypath_foundation::{Error, Result, Value};

use crate::ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Deepest syntactic nesting the parser accepts.
///
/// Every chained operator and postfix step counts as a level, so the tree
/// depth stays bounded for long flat chains like `1+1+…` or `a.b.c…`.
pub const MAX_NESTING: usize = 256;

/// Parser for expression source text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
    /// Current nesting depth of sub-expressions.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            depth: 0,
        }
    }

    /// Parses the whole source as a single expression.
    ///
    /// # Errors
    /// Returns a compile error if the source is empty, malformed, or has
    /// trailing tokens.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error("expected an expression"));
        }
        let expr = self.parse_or()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let base = self.depth;
        self.enter()?;
        let mut left = self.parse_and()?;
        while self.current.kind == TokenKind::OrOr {
            self.advance();
            self.enter()?;
            let right = self.parse_and()?;
            left = logical(LogicalOp::Or, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut left = self.parse_equality()?;
        while self.current.kind == TokenKind::AndAnd {
            self.advance();
            self.enter()?;
            let right = self.parse_equality()?;
            left = logical(LogicalOp::And, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.current.kind {
                TokenKind::EqEq => BinaryOp::LooseEq,
                TokenKind::NotEq => BinaryOp::LooseNe,
                TokenKind::EqEqEq => BinaryOp::StrictEq,
                TokenKind::NotEqEq => BinaryOp::StrictNe,
                _ => break,
            };
            self.advance();
            self.enter()?;
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::LessEq => BinaryOp::Le,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::GreaterEq => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            self.enter()?;
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.enter()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => break,
            };
            self.advance();
            self.enter()?;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current.kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_postfix(),
        };
        let start = self.current.span;
        self.advance();
        self.enter()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;
        let span = start.to(operand.span());
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut expr = self.parse_primary()?;
        loop {
            if matches!(
                self.current.kind,
                TokenKind::Dot | TokenKind::LBracket | TokenKind::LParen
            ) {
                self.enter()?;
            }
            match self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let Some(property) = self.current.kind.property_name().map(str::to_string)
                    else {
                        return Err(self.error(&format!(
                            "expected property name after '.', found {}",
                            self.current.kind.name()
                        )));
                    };
                    let span = expr.span().to(self.current.span);
                    self.advance();
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property,
                        span,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_or()?;
                    let span = expr.span().to(self.current.span);
                    self.expect(&TokenKind::RBracket)?;
                    expr = Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                TokenKind::LParen => {
                    let Expr::Identifier(callee, start) = expr else {
                        return Err(self.error("only helper functions can be called"));
                    };
                    self.advance();
                    let args = self.parse_arguments()?;
                    let span = start.to(self.current.span);
                    self.expect(&TokenKind::RParen)?;
                    expr = Expr::Call { callee, args, span };
                }
                _ => break,
            }
        }
        self.depth = base;
        Ok(expr)
    }

    /// Parses a comma-separated argument list up to (not including) `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        while self.current.kind != TokenKind::RParen {
            args.push(self.parse_or()?);
            if self.current.kind == TokenKind::Comma {
                self.advance();
            } else if self.current.kind != TokenKind::RParen {
                return Err(self.unexpected());
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let span = self.current.span;
        let expr = match &self.current.kind {
            TokenKind::Number(n) => Expr::Literal(Value::Number(*n), span),
            TokenKind::String(s) => Expr::Literal(Value::Text(s.clone()), span),
            TokenKind::True => Expr::Literal(Value::Bool(true), span),
            TokenKind::False => Expr::Literal(Value::Bool(false), span),
            TokenKind::Null => Expr::Literal(Value::Null, span),
            TokenKind::Undefined => Expr::Undefined(span),
            TokenKind::This => Expr::This(span),
            TokenKind::Ident(name) => Expr::Identifier(name.clone(), span),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_or()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::Error(msg) => return Err(self.error(msg)),
            TokenKind::Eof => return Err(self.error("unexpected end of input")),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(expr)
    }

    /// Descends one nesting level, failing past [`MAX_NESTING`].
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error("expression nested too deeply"));
        }
        Ok(())
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        if std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                expected.name(),
                self.current.kind.name()
            )))
        }
    }

    fn unexpected(&self) -> Error {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            kind => self.error(&format!("unexpected {}", kind.name())),
        }
    }

    /// Creates a compile error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a compile error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::compile(message, span.line, span.column, self.context_at(span))
    }

    /// Gets the source line containing a span.
    fn context_at(&self, span: Span) -> String {
        source_line(self.source, span)
    }
}

/// Returns the line of `source` that `span` starts on.
pub(crate) fn source_line(source: &str, span: Span) -> String {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[span.start..]
        .find('\n')
        .map_or(source.len(), |i| span.start + i);

    source[line_start..line_end].to_string()
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span().to(right.span());
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    }
}

fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    let span = left.span().to(right.span());
    Expr::Logical {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    }
}

/// Compiles expression text into an expression tree.
///
/// # Errors
/// Returns a compile error if the source is not a single well-formed
/// expression.
pub fn compile(source: &str) -> Result<Expr> {
    Parser::new(source).parse()
}
