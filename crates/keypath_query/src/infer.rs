//! Type inference for query-string values.
//!
//! A decoded value is tried as a number, then a boolean, then a date, and
//! otherwise stays text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use keypath_foundation::Value;

use crate::config::QueryConfig;

/// Naive layouts read as UTC, most specific first.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A query value after inference.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedToken {
    /// Finite decimal number.
    Number(f64),
    /// `true` or `false`, any case.
    Boolean(bool),
    /// Recognized date or date-time.
    Date(DateTime<Utc>),
    /// Anything else, unchanged.
    Text(String),
}

impl From<TypedToken> for Value {
    fn from(token: TypedToken) -> Self {
        match token {
            TypedToken::Number(n) => Value::Number(n),
            TypedToken::Boolean(b) => Value::Bool(b),
            TypedToken::Date(d) => Value::DateTime(d),
            TypedToken::Text(s) => Value::Text(s),
        }
    }
}

/// Returns true if `s` is a finite decimal number.
///
/// Surrounding whitespace is allowed. Empty strings, `Infinity`, `NaN` and
/// radix-prefixed literals are not numeric.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    parse_number(s).is_some()
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty()
        || !s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Returns true if `s` is `true` or `false`, ignoring case.
#[must_use]
pub fn is_boolean(s: &str) -> bool {
    parse_bool(s).is_some()
}

/// Reads `true` or `false`, ignoring case.
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Reads a boolean, returning `default` for anything else.
#[must_use]
pub fn str_to_bool(s: &str, default: bool) -> bool {
    parse_bool(s).unwrap_or(default)
}

/// Returns true if `s` parses as a date.
#[must_use]
pub fn is_date_time(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Parses a date or date-time.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD`, and `YYYY-MM-DD[T ]HH:MM:SS`
/// with optional fractional seconds. Values without an offset are UTC.
#[must_use]
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Some(d) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return Some(d.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Infers the type of a decoded query value.
#[must_use]
pub fn infer_type(s: &str) -> TypedToken {
    infer_type_with(s, &QueryConfig::default())
}

/// Infers the type of a decoded query value under `config`.
#[must_use]
pub fn infer_type_with(s: &str, config: &QueryConfig) -> TypedToken {
    if !config.infer_types {
        return TypedToken::Text(s.to_string());
    }
    if let Some(n) = parse_number(s) {
        return TypedToken::Number(n);
    }
    if let Some(b) = parse_bool(s) {
        return TypedToken::Boolean(b);
    }
    if config.infer_dates {
        if let Some(d) = parse_date(s) {
            return TypedToken::Date(d);
        }
    }
    TypedToken::Text(s.to_string())
}

/// Infers the type of `s` and converts it to a [`Value`].
#[must_use]
pub fn typed_value_of(s: &str) -> Value {
    infer_type(s).into()
}
