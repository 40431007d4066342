//! Core value type for all Keypath data.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use crate::kind::Kind;
use crate::pattern::Pattern;

/// String-keyed mapping that preserves insertion order.
pub type Mapping = IndexMap<String, Value>;

/// Core value type for all Keypath data.
///
/// Containers own their elements outright: no variant shares storage with
/// another value, so a clone never aliases its source.
#[derive(Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// Text value.
    Text(String),
    /// Point in time (UTC, millisecond precision is significant).
    DateTime(DateTime<Utc>),
    /// Regular expression.
    Pattern(Pattern),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// String-keyed mapping.
    Mapping(Mapping),
}

impl Value {
    /// Creates an empty mapping value.
    #[must_use]
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Creates a sequence value from anything convertible to values.
    pub fn sequence<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        Kind::of(self)
    }

    /// Returns the kind name of this value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this value is truthy.
    ///
    /// `null`, `false`, `0`, `NaN` and the empty string are falsy; every
    /// container, date and pattern is truthy, even when empty.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::DateTime(_) | Self::Pattern(_) | Self::Sequence(_) | Self::Mapping(_) => true,
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a date.
    #[must_use]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(d) => Some(d),
            _ => None,
        }
    }

    /// Attempts to extract a pattern.
    #[must_use]
    pub const fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Self::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Attempts to extract a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a key when this value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Returns true if this is a server-side error payload: a mapping whose
    /// `statusCode`, `error` and `message` fields are all truthy.
    #[must_use]
    pub fn is_error_object(&self) -> bool {
        ["statusCode", "error", "message"]
            .iter()
            .all(|field| self.get(field).is_some_and(Value::is_truthy))
    }
}

/// Renders a number the way script engines stringify them.
///
/// Uses the shortest digits that round-trip. Decimal exponents from -6 to
/// 20 print in positional form (`0.000001`, `100000000000000000000`); the
/// rest print in exponent form (`1e-7`, `1.5e+21`). The special values print
/// as `NaN`, `Infinity` and `-Infinity`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{n}");
    };
    match exponent.parse::<i32>() {
        Ok(exponent) if !(-6..=20).contains(&exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{}", exponent.unsigned_abs())
        }
        _ => format!("{n}"),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::structural::deep_equal(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::DateTime(d) => write!(f, "Date({})", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Pattern(p) => write!(f, "{p:?}"),
            Self::Sequence(items) => f.debug_list().entries(items).finish(),
            Self::Mapping(m) => f.debug_map().entries(m.iter()).finish(),
        }
    }
}

/// String conversion: the text a value contributes when concatenated or
/// written into a query string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Text(s) => write!(f, "{s}"),
            Self::DateTime(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Pattern(p) => write!(f, "{p}"),
            Self::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if !item.is_null() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Mapping(_) => write!(f, "[object Object]"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::DateTime(d)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Self::Pattern(p)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
