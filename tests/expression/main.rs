//! Integration tests for Layer 1: Expression
//!
//! Tests for path parsing, expression evaluation against context values,
//! and helper registries.

mod evaluate;
mod helpers;
mod path;
