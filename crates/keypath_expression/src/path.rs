//! Path strings like `foo.bar[0]."biz-baz"`.
//!
//! A path splits on `.`, `[` and `]`. Quoted runs (single or double) are
//! kept whole, so `a."b.c"` has two segments. Quote characters never
//! survive into a segment.

use keypath_foundation::Value;

/// Splits a path string into its segments.
///
/// Returns an empty vector when the string has no matchable segment;
/// callers treat that as "no path".
#[must_use]
pub fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = path;

    while let Some(c) = rest.chars().next() {
        match c {
            '.' | '[' | ']' => rest = &rest[1..],
            '"' | '\'' => {
                // A quoted run needs at least one character before its
                // closing quote; otherwise the quote is skipped.
                let body = &rest[1..];
                match body.find(c) {
                    Some(end) if end > 0 => {
                        segments.push(strip_quotes(&body[..end]));
                        rest = &body[end + 1..];
                    }
                    _ => rest = body,
                }
            }
            _ => {
                let end = rest
                    .find(|c: char| matches!(c, '.' | '[' | ']' | '"' | '\''))
                    .unwrap_or(rest.len());
                segments.push(rest[..end].to_string());
                rest = &rest[end..];
            }
        }
    }

    segments
}

fn strip_quotes(segment: &str) -> String {
    segment.chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}

/// Walks `segments` through `value`: mappings by key, sequences by
/// decimal position.
///
/// Returns `None` as soon as a segment does not resolve.
pub fn resolve_path<'v, S: AsRef<str>>(value: &'v Value, segments: &[S]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| {
            let segment = segment.as_ref();
            match current {
                Value::Mapping(entries) => entries.get(segment),
                Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
}
