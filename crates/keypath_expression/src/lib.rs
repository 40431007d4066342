//! Path parsing and a restricted expression interpreter for Keypath.
//!
//! This crate provides:
//! - [`parse_path`] - Split `foo.bar[0]."biz-baz"` into path segments
//! - [`Lexer`] / [`Parser`] - Compile expression text into an [`Expr`] tree
//! - [`Evaluator`] - Interpret an [`Expr`] against a context value, binding
//!   the context's own keys as local names alongside a [`HelperRegistry`]
//!
//! Expressions never execute host code: the grammar covers literals, names,
//! `this`, member and index access, helper calls, and the usual arithmetic,
//! comparison and logical operators.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
mod coerce;
pub mod config;
pub mod evaluator;
pub mod helpers;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod span;
pub mod token;

pub use ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
pub use config::EvaluatorConfig;
pub use evaluator::{Evaluator, evaluate, get_object_value};
pub use helpers::{HelperCall, HelperFn, HelperRegistry};
pub use lexer::Lexer;
pub use parser::{MAX_NESTING, Parser, compile};
pub use path::{parse_path, resolve_path};
pub use span::Span;
pub use token::{Token, TokenKind};
