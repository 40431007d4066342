//! Core value type, type classification, and structural operations for Keypath.
//!
//! This crate provides:
//! - [`Value`] - The universal value type every other layer operates over
//! - [`Kind`] - Closed classification of values (`classify`)
//! - [`Pattern`] - Regular-expression values
//! - [`structural`] - Deep clone, deep equality, and structural merge
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod kind;
pub mod pattern;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod structural;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind};
pub use kind::{Kind, classify};
pub use pattern::Pattern;
pub use structural::{clone, deep_equal, flatten, merge};
pub use value::{Mapping, Value, format_number};

/// Result type alias using Keypath's Error type.
pub type Result<T> = std::result::Result<T, Error>;
