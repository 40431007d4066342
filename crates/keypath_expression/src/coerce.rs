//! Operand coercions used by the evaluator's operators.
//!
//! `None` stands for `undefined` throughout.

use std::cmp::Ordering;

use keypath_foundation::{Kind, Value, deep_equal};

/// Numeric value of an operand.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => *n,
        Some(Value::Text(s)) => text_to_number(s),
        Some(Value::DateTime(d)) => d.timestamp_millis() as f64,
        Some(other @ (Value::Sequence(_) | Value::Mapping(_) | Value::Pattern(_))) => {
            text_to_number(&other.to_string())
        }
    }
}

/// Numeric value of a string operand.
///
/// Surrounding whitespace is ignored, the empty string is `0`, and `0x`,
/// `0o` and `0b` prefixes select a radix. Anything else that is not a
/// decimal literal is `NaN`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn text_to_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    // f64's parser also takes "inf" and "nan", which are not numbers here.
    if text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// String value of an operand. Also the property key an index selects.
pub(crate) fn to_text(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), ToString::to_string)
}

/// True if `+` concatenates rather than adds when this operand is present.
pub(crate) const fn concatenates(value: Option<&Value>) -> bool {
    matches!(
        value,
        Some(
            Value::Text(_)
                | Value::Sequence(_)
                | Value::Mapping(_)
                | Value::Pattern(_)
                | Value::DateTime(_)
        )
    )
}

/// Orders two operands for `<`, `<=`, `>` and `>=`.
///
/// Operands that both convert to strings compare by UTF-16 code units;
/// everything else compares numerically. `None` means unordered (`NaN`).
pub(crate) fn compare(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    if compares_as_text(left) && compares_as_text(right) {
        let left = to_text(left);
        let right = to_text(right);
        Some(left.encode_utf16().cmp(right.encode_utf16()))
    } else {
        to_number(left).partial_cmp(&to_number(right))
    }
}

const fn compares_as_text(value: Option<&Value>) -> bool {
    matches!(
        value,
        Some(Value::Text(_) | Value::Sequence(_) | Value::Mapping(_) | Value::Pattern(_))
    )
}

/// `===`: same kind and structurally equal. `undefined` equals only itself.
pub(crate) fn strict_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => deep_equal(l, r),
        _ => false,
    }
}

/// `==`: `null` and `undefined` equal each other, and mixed scalar kinds
/// are compared after numeric or string conversion.
pub(crate) fn loose_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None | Some(Value::Null), None | Some(Value::Null)) => true,
        (None | Some(Value::Null), _) | (_, None | Some(Value::Null)) => false,
        (Some(l), Some(r)) => loose_equal_values(l, r),
    }
}

fn loose_equal_values(left: &Value, right: &Value) -> bool {
    if Kind::of(left) == Kind::of(right) {
        return deep_equal(left, right);
    }
    match (left, right) {
        (Value::Bool(b), _) => loose_equal_values(&Value::Number(f64::from(u8::from(*b))), right),
        (_, Value::Bool(b)) => loose_equal_values(left, &Value::Number(f64::from(u8::from(*b)))),
        #[allow(clippy::float_cmp)]
        (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
            *n == text_to_number(s)
        }
        (Value::Number(_) | Value::Text(_), _) => {
            loose_equal_values(left, &Value::Text(right.to_string()))
        }
        (_, Value::Number(_) | Value::Text(_)) => {
            loose_equal_values(&Value::Text(left.to_string()), right)
        }
        _ => false,
    }
}
