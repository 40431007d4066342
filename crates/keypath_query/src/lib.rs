//! Typed query-string codec for Keypath.
//!
//! This crate provides:
//! - [`parse_query`] - Decode `a=1&b=true` into a typed mapping
//! - [`make_query_params`] / [`add_query_params`] - Encode values back
//! - [`get_query_param`] / [`extract_query_params`] - Look parameters up
//!   with path expressions
//! - [`infer`] - Number, boolean and date inference for decoded text
//! - [`query_helpers`] - The codec as expression helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod config;
pub mod helpers;
pub mod infer;

pub use codec::{
    ExtractedParams, add_query_params, extract_query_params, get_query_param, make_query_params,
    parse_query, parse_query_with,
};
pub use config::QueryConfig;
pub use helpers::query_helpers;
pub use infer::{
    TypedToken, infer_type, infer_type_with, is_boolean, is_date_time, is_numeric, parse_bool,
    parse_date, str_to_bool, typed_value_of,
};
