//! Integration tests for Layer 2: Query
//!
//! Tests for query-string decoding with type inference, encoding, and
//! expression-based parameter lookup.

mod codec;
mod helpers;
mod infer;
