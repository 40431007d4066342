//! Query-string encoding and decoding.
//!
//! The format is `key=value&key2=value2`, percent-encoded, with nested
//! mappings and sequences written as bracket-suffixed keys (`a[b]=1`,
//! `list[0]=x`). Decoding infers value types; see [`crate::infer`].

use std::borrow::Cow;
use std::mem;

use indexmap::map::Entry;
use keypath_expression::Evaluator;
use keypath_foundation::{Mapping, Result, Value};
use tracing::trace;

use crate::config::QueryConfig;
use crate::helpers::query_helpers;
use crate::infer::infer_type_with;

// =============================================================================
// Decoding
// =============================================================================

/// Decodes a query string with the default configuration.
///
/// A leading `?` is ignored. Repeated keys collect their values into a
/// sequence in the order they appear.
#[must_use]
pub fn parse_query(query: &str) -> Mapping {
    parse_query_with(query, &QueryConfig::default())
}

/// Decodes a query string under `config`.
#[must_use]
pub fn parse_query_with(query: &str, config: &QueryConfig) -> Mapping {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut entries = Mapping::new();

    for part in query.split('&') {
        let (raw_key, raw_value) = part.split_once('=').unwrap_or((part, ""));
        let key = decode(raw_key);
        if key.is_empty() {
            if !part.is_empty() {
                trace!(part, "skipping query entry with empty key");
            }
            continue;
        }
        let value = infer_type_with(&decode(raw_value), config).into();

        let value = match config.nested_keys.then(|| bracket_segments(&key, config.max_depth)).flatten() {
            Some(segments) => match insert_path(&mut entries, &segments, value) {
                None => continue,
                Some(value) => {
                    trace!(key = %key, "bracket key collides with a scalar, keeping it flat");
                    value
                }
            },
            None => value,
        };
        collect(&mut entries, key.into_owned(), value, false);
    }

    if config.nested_keys {
        for value in entries.values_mut() {
            *value = index_keyed_to_sequence(mem::replace(value, Value::Null));
        }
    }
    entries
}

fn decode(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(error) => {
            trace!(raw, %error, "percent sequence is not UTF-8, keeping it as written");
            Cow::Borrowed(raw)
        }
    }
}

/// Splits `base[a][b]` into `["base", "a", "b"]`.
///
/// At most `max_depth` bracketed segments are read; anything after them
/// becomes one literal segment, so `a[b][c]` with a limit of 1 gives
/// `["a", "b", "[c]"]`. Returns `None` for keys that are not a non-empty
/// base followed by bracketed segments.
fn bracket_segments(key: &str, max_depth: usize) -> Option<Vec<&str>> {
    let open = key.find('[')?;
    if open == 0 {
        return None;
    }
    let (base, mut rest) = key.split_at(open);
    let mut segments = vec![base];
    while !rest.is_empty() {
        if segments.len() > max_depth {
            trace!(key, max_depth, "bracket depth limit reached, keeping the rest literal");
            segments.push(rest);
            break;
        }
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some(segments)
}

/// Stores `value` under a nested key path.
///
/// A trailing empty segment (`a[]`) appends. Returns the value back if the
/// path runs into an existing non-mapping entry.
fn insert_path(entries: &mut Mapping, segments: &[&str], value: Value) -> Option<Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };
    match rest {
        [] => {
            collect(entries, (*first).to_string(), value, false);
            None
        }
        [""] => {
            collect(entries, (*first).to_string(), value, true);
            None
        }
        _ => match entries
            .entry((*first).to_string())
            .or_insert_with(Value::empty_mapping)
        {
            Value::Mapping(inner) => insert_path(inner, rest, value),
            _ => Some(value),
        },
    }
}

/// Adds a value under `key`, turning repeats into a sequence.
///
/// With `as_list` a first value is stored as a one-element sequence.
fn collect(entries: &mut Mapping, key: String, value: Value, as_list: bool) {
    match entries.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(if as_list {
                Value::Sequence(vec![value])
            } else {
                value
            });
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Sequence(items) => items.push(value),
            existing => {
                let first = mem::replace(existing, Value::Null);
                *existing = Value::Sequence(vec![first, value]);
            }
        },
    }
}

/// Turns nested mappings keyed exactly `0..n` into sequences.
fn index_keyed_to_sequence(value: Value) -> Value {
    match value {
        Value::Mapping(entries) => {
            let entries: Mapping = entries
                .into_iter()
                .map(|(key, item)| (key, index_keyed_to_sequence(item)))
                .collect();
            match index_order(&entries) {
                Some(order) => {
                    let mut items = vec![Value::Null; order.len()];
                    for ((_, item), position) in entries.into_iter().zip(order) {
                        items[position] = item;
                    }
                    Value::Sequence(items)
                }
                None => Value::Mapping(entries),
            }
        }
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(index_keyed_to_sequence).collect())
        }
        other => other,
    }
}

/// Positions of each key if the keys are exactly the indices `0..len`.
fn index_order(entries: &Mapping) -> Option<Vec<usize>> {
    if entries.is_empty() {
        return None;
    }
    let mut seen = vec![false; entries.len()];
    let mut order = Vec::with_capacity(entries.len());
    for key in entries.keys() {
        let index = key.parse::<usize>().ok()?;
        if index.to_string() != *key || index >= seen.len() || seen[index] {
            return None;
        }
        seen[index] = true;
        order.push(index);
    }
    Some(order)
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a mapping or sequence as a query string.
///
/// Nested containers use bracket-suffixed keys under `prefix`; sequence
/// entries are keyed by position. `null` entries are omitted, and a scalar
/// encodes to the empty string.
#[must_use]
pub fn make_query_params(value: &Value, prefix: Option<&str>) -> String {
    let mut parts = Vec::new();
    write_params(value, prefix, &mut parts);
    parts.join("&")
}

fn write_params(value: &Value, prefix: Option<&str>, parts: &mut Vec<String>) {
    let entries: Vec<(Cow<'_, str>, &Value)> = match value {
        Value::Mapping(entries) => entries
            .iter()
            .map(|(k, v)| (Cow::Borrowed(k.as_str()), v))
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (Cow::Owned(i.to_string()), v))
            .collect(),
        _ => return,
    };

    for (name, item) in entries {
        let name = urlencoding::encode(&name);
        let key = match prefix {
            Some(prefix) => format!("{prefix}[{name}]"),
            None => name.into_owned(),
        };
        match item {
            Value::Null => {}
            Value::Mapping(_) | Value::Sequence(_) => write_params(item, Some(&key), parts),
            scalar => parts.push(format!("{key}={}", urlencoding::encode(&scalar.to_string()))),
        }
    }
}

/// Appends the encoded `params` to `url`.
///
/// Uses `&` if `url` already has a query and `?` otherwise. Returns `url`
/// unchanged when there is nothing to append.
#[must_use]
pub fn add_query_params(url: &str, params: &Value) -> String {
    let query = make_query_params(params, None);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

// =============================================================================
// Lookup
// =============================================================================

/// Parameters picked out of a query by [`extract_query_params`].
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractedParams {
    /// Re-encoded as a query string with a leading `?`, or empty.
    Text(String),
    /// The picked values by name.
    Params(Mapping),
}

impl From<ExtractedParams> for Value {
    fn from(extracted: ExtractedParams) -> Self {
        match extracted {
            ExtractedParams::Text(text) => Value::Text(text),
            ExtractedParams::Params(entries) => Value::Mapping(entries),
        }
    }
}

/// Evaluates `name` against the decoded `query`.
///
/// `name` is an expression, so `page`, `filter.kind` and `ids[0]` all work.
/// The query helpers are in scope.
///
/// # Errors
/// Returns a compile error if `name` is malformed.
pub fn get_query_param(query: &str, name: &str, fallback: Option<Value>) -> Result<Option<Value>> {
    let evaluator = Evaluator::new(query_helpers(query));
    evaluator.evaluate(name, &Value::Mapping(parse_query(query)), fallback)
}

/// Picks the named parameters out of `query`.
///
/// Names that evaluate to `undefined` are left out. With `as_string` the
/// result is re-encoded through [`add_query_params`] onto an empty URL.
///
/// # Errors
/// Returns a compile error if any name is malformed.
pub fn extract_query_params<S: AsRef<str>>(query: &str, names: &[S], as_string: bool) -> Result<ExtractedParams> {
    let evaluator = Evaluator::new(query_helpers(query));
    let params = Value::Mapping(parse_query(query));
    extract_from(&params, names, as_string, |name, params| {
        evaluator.evaluate(name, params, None)
    })
}

/// Shared body of [`extract_query_params`] and its helper form.
pub(crate) fn extract_from<S, F>(params: &Value, names: &[S], as_string: bool, mut resolve: F) -> Result<ExtractedParams>
where
    S: AsRef<str>,
    F: FnMut(&str, &Value) -> Result<Option<Value>>,
{
    let mut picked = Mapping::new();
    for name in names {
        let name = name.as_ref();
        if let Some(value) = resolve(name, params)? {
            picked.insert(name.to_string(), value);
        }
    }

    if as_string {
        Ok(ExtractedParams::Text(add_query_params("", &Value::Mapping(picked))))
    } else {
        Ok(ExtractedParams::Params(picked))
    }
}
