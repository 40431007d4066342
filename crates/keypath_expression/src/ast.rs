//! Expression tree for Keypath expressions.

use std::fmt;

use keypath_foundation::Value;

use crate::span::Span;

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Literal like `42`, `'text'`, `true` or `null`
    Literal(Value, Span),
    /// `undefined`
    Undefined(Span),
    /// Name bound from the context or the helper registry
    Identifier(String, Span),
    /// `this`
    This(Span),
    /// Property access like `foo.bar`
    Member {
        /// Expression being accessed.
        object: Box<Expr>,
        /// Property name.
        property: String,
        /// Source span.
        span: Span,
    },
    /// Computed access like `arr[idx]`
    Index {
        /// Expression being accessed.
        object: Box<Expr>,
        /// Key or position expression.
        index: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// Helper call like `getQueryParam('page', 1)`
    Call {
        /// Helper name.
        callee: String,
        /// Argument expressions.
        args: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// Prefix operator like `!flag` or `-n`
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// Arithmetic, comparison or equality operator
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// Short-circuiting `&&` or `||`
    Logical {
        /// The operator.
        op: LogicalOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
}

/// Prefix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Negate,
    /// `+`
    Plus,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    LooseEq,
    /// `!=`
    LooseNe,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNe,
}

/// Short-circuiting operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl Expr {
    /// Returns the source span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal(_, s) | Self::Undefined(s) | Self::Identifier(_, s) | Self::This(s) => *s,
            Self::Member { span, .. }
            | Self::Index { span, .. }
            | Self::Call { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Logical { span, .. } => *span,
        }
    }

    /// Returns true if this node is a literal (including `undefined`).
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(..) | Self::Undefined(_))
    }

    /// Returns the first name this expression looks up, identifiers and
    /// helper calls alike, in evaluation order.
    #[must_use]
    pub fn first_free_name(&self) -> Option<(&str, Span)> {
        match self {
            Self::Literal(..) | Self::Undefined(_) | Self::This(_) => None,
            Self::Identifier(name, span) => Some((name, *span)),
            Self::Call { callee, span, .. } => Some((callee, *span)),
            Self::Member { object, .. } | Self::Unary { operand: object, .. } => {
                object.first_free_name()
            }
            Self::Index { object, index, .. } => {
                object.first_free_name().or_else(|| index.first_free_name())
            }
            Self::Binary { left, right, .. } | Self::Logical { left, right, .. } => {
                left.first_free_name().or_else(|| right.first_free_name())
            }
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::Plus => "+",
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::LooseEq => "==",
            Self::LooseNe => "!=",
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
        })
    }
}
