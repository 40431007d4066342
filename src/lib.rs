//! Keypath - Path expressions, structural merge, and a typed query codec
//!
//! This crate re-exports all layers of the Keypath system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: keypath_query       - Query-string parsing, encoding, type inference
//! Layer 1: keypath_expression  - Path parsing, expression compiler and evaluator
//! Layer 0: keypath_foundation  - Core types (Value, Kind, Error), clone/equal/merge
//! ```

pub use keypath_expression as expression;
pub use keypath_foundation as foundation;
pub use keypath_query as query;
