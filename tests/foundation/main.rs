//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Kind, Pattern, Error, and the structural
//! operations clone, deep_equal and merge.

mod errors;
mod kinds;
mod values;
