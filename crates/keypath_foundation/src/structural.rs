//! Structural operations over values: deep clone, deep equality, merge.
//!
//! All operations are pure. Arguments are borrowed and never mutated, and
//! every result is freshly allocated.

use crate::kind::Kind;
use crate::value::{Mapping, Value};

/// Deep-copies a value.
///
/// Sequences are copied element-wise, mappings key by key, patterns are
/// rebuilt from their source and flags, and dates and scalars are copied
/// as-is.
#[must_use]
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.iter().map(clone).collect()),
        Value::Mapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), clone(item)))
                .collect(),
        ),
        Value::Pattern(pattern) => Value::Pattern(pattern.rebuild()),
        Value::DateTime(date) => Value::DateTime(*date),
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(*n),
        Value::Text(s) => Value::Text(s.clone()),
    }
}

/// Compares two values structurally.
///
/// Values of different kinds are never equal. Mappings compare by key set
/// (ignoring order) and per-key values, sequences position by position,
/// dates by millisecond timestamp, and patterns by source and flags.
/// Numbers use IEEE equality, so `NaN` never equals anything.
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if Kind::of(a) != Kind::of(b) {
        return false;
    }
    match (a, b) {
        (Value::Mapping(x), Value::Mapping(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, item)| y.get(key).is_some_and(|other| deep_equal(item, other)))
        }
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::DateTime(x), Value::DateTime(y)) => x.timestamp_millis() == y.timestamp_millis(),
        (Value::Pattern(x), Value::Pattern(y)) => x == y,
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        #[allow(clippy::float_cmp)]
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Text(x), Value::Text(y)) => x == y,
        _ => false,
    }
}

/// Merges values left to right into a new value.
///
/// With no arguments the result is an empty mapping. Otherwise the result
/// starts as a clone of the first value and each further value is folded in:
///
/// - a falsy accumulator is replaced by the argument;
/// - a sequence accumulator is extended by the argument (a non-sequence
///   argument is appended as one element);
/// - a sequence argument produces `[accumulator, ...argument]`;
/// - a scalar accumulator is replaced by the argument;
/// - a scalar or `null` argument produces `[accumulator, argument]`;
/// - a mapping argument is merged key by key, recursively, into the
///   accumulator's entries (dates and patterns contribute no entries).
#[must_use]
pub fn merge(values: &[Value]) -> Value {
    let Some((first, rest)) = values.split_first() else {
        return Value::empty_mapping();
    };
    rest.iter().fold(clone(first), merge_into)
}

/// Folds one argument into an owned accumulator.
fn merge_into(acc: Value, arg: &Value) -> Value {
    if !acc.is_truthy() {
        return clone(arg);
    }
    match (acc, arg) {
        (Value::Sequence(mut items), Value::Sequence(more)) => {
            items.extend(more.iter().map(clone));
            Value::Sequence(items)
        }
        (Value::Sequence(mut items), other) => {
            items.push(clone(other));
            Value::Sequence(items)
        }
        (acc, Value::Sequence(more)) => {
            let mut items = Vec::with_capacity(more.len() + 1);
            items.push(acc);
            items.extend(more.iter().map(clone));
            Value::Sequence(items)
        }
        (acc, arg) if !acc.kind().is_object_like() => clone(arg),
        (acc, arg) if !arg.kind().is_object_like() || arg.is_null() => {
            Value::Sequence(vec![acc, clone(arg)])
        }
        (acc, Value::Mapping(entries)) => {
            let mut merged = match acc {
                Value::Mapping(existing) => existing,
                _ => Mapping::with_capacity(entries.len()),
            };
            for (key, item) in entries {
                match merged.get_mut(key) {
                    Some(slot) => {
                        let current = std::mem::replace(slot, Value::Null);
                        *slot = merge_into(current, item);
                    }
                    None => {
                        merged.insert(key.clone(), clone(item));
                    }
                }
            }
            Value::Mapping(merged)
        }
        (acc, _) => acc,
    }
}

/// Recursively flattens nested sequences into a single sequence.
///
/// Non-sequence values are returned unchanged (cloned).
#[must_use]
pub fn flatten(value: &Value) -> Value {
    fn collect(value: &Value, out: &mut Vec<Value>) {
        match value {
            Value::Sequence(items) => {
                for item in items {
                    collect(item, out);
                }
            }
            other => out.push(clone(other)),
        }
    }

    match value {
        Value::Sequence(_) => {
            let mut out = Vec::new();
            collect(value, &mut out);
            Value::Sequence(out)
        }
        other => clone(other),
    }
}
