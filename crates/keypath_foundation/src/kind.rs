//! Closed classification of values.
//!
//! [`Kind`] refines the coarse `typeof`-style split: `null`, sequences,
//! dates and patterns get their own kinds instead of all reading as "object".

use std::fmt;

use crate::value::Value;

/// The kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`.
    Null,
    /// Ordered sequence.
    Array,
    /// Point in time.
    Date,
    /// Regular expression.
    Regex,
    /// String-keyed mapping.
    Object,
    /// `true` or `false`.
    Boolean,
    /// Double-precision number.
    Number,
    /// Text.
    String,
}

impl Kind {
    /// Classifies a value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::Text(_) => Self::String,
            Value::DateTime(_) => Self::Date,
            Value::Pattern(_) => Self::Regex,
            Value::Sequence(_) => Self::Array,
            Value::Mapping(_) => Self::Object,
        }
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Array => "array",
            Self::Date => "date",
            Self::Regex => "regex",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }

    /// Returns true for kinds a coarse `typeof` check reports as "object".
    ///
    /// This is every container-like kind plus `null`; structural merge
    /// dispatches on it.
    #[must_use]
    pub const fn is_object_like(self) -> bool {
        matches!(
            self,
            Self::Null | Self::Array | Self::Date | Self::Regex | Self::Object
        )
    }

    /// Returns true for the scalar kinds.
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Boolean | Self::Number | Self::String)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies a value into its [`Kind`].
#[must_use]
pub const fn classify(value: &Value) -> Kind {
    Kind::of(value)
}
