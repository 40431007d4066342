//! Tests for query-string decoding and encoding

use chrono::{TimeZone, Utc};
use keypath::foundation::Value;
use keypath::query::{
    ExtractedParams, QueryConfig, add_query_params, extract_query_params, get_query_param,
    make_query_params, parse_query, parse_query_with,
};

fn obj(entries: Vec<(&str, Value)>) -> Value {
    entries.into_iter().collect()
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn decode_typed_values() {
    let parsed = parse_query("?n=1.5&yes=TRUE&day=2020-01-02&name=bob");
    assert_eq!(parsed.get("n"), Some(&Value::from(1.5)));
    assert_eq!(parsed.get("yes"), Some(&Value::Bool(true)));
    assert_eq!(
        parsed.get("day"),
        Some(&Value::from(Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap()))
    );
    assert_eq!(parsed.get("name"), Some(&Value::from("bob")));
}

#[test]
fn decode_repeated_keys_in_order() {
    let parsed = parse_query("id=3&other=x&id=1&id=2");
    assert_eq!(parsed.get("id"), Some(&Value::sequence([3, 1, 2])));
    let keys: Vec<&String> = parsed.keys().collect();
    assert_eq!(keys, vec!["id", "other"]);
}

#[test]
fn decode_percent_escapes() {
    let parsed = parse_query("q=caf%C3%A9%20au%20lait&k%5B%5D=1");
    assert_eq!(parsed.get("q"), Some(&Value::from("café au lait")));
    assert_eq!(parsed.get("k"), Some(&Value::sequence([1])));
}

#[test]
fn decode_nested_brackets() {
    let parsed = parse_query("user[name]=ann&user[roles][0]=admin&user[roles][1]=dev");
    assert_eq!(
        parsed.get("user"),
        Some(&obj(vec![
            ("name", Value::from("ann")),
            ("roles", Value::sequence(["admin", "dev"])),
        ]))
    );
}

#[test]
fn decode_deep_brackets_stays_bounded() {
    let query = format!("a{}=1", "[x]".repeat(10_000));
    let parsed = parse_query(&query);
    let depth = QueryConfig::default().max_depth;

    let mut level = &parsed["a"];
    for _ in 0..depth {
        level = level.get("x").expect("nested level");
    }
    let rest = "[x]".repeat(10_000 - depth);
    assert_eq!(level.get(&rest), Some(&Value::from(1)));
}

#[test]
fn decode_without_inference() {
    let parsed = parse_query_with("n=1&b=true", &QueryConfig::raw());
    assert_eq!(parsed.get("n"), Some(&Value::from("1")));
    assert_eq!(parsed.get("b"), Some(&Value::from("true")));
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn encode_escapes_keys_and_values() {
    let params = obj(vec![("a b", Value::from("c&d"))]);
    assert_eq!(make_query_params(&params, None), "a%20b=c%26d");
}

#[test]
fn encode_dates_as_iso_text() {
    let day = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    let params = obj(vec![("d", Value::from(day))]);
    assert_eq!(
        make_query_params(&params, None),
        "d=2020-01-02T00%3A00%3A00.000Z"
    );
}

#[test]
fn encoded_params_decode_back() {
    let params = obj(vec![
        ("page", Value::from(2)),
        ("filter", obj(vec![("kind", Value::from("open"))])),
        ("ids", Value::sequence([4, 5])),
    ]);
    let decoded = parse_query(&make_query_params(&params, None));
    assert_eq!(Value::Mapping(decoded), params);
}

#[test]
fn add_params_picks_separator() {
    let params = obj(vec![("a", Value::from(1))]);
    assert_eq!(add_query_params("/search", &params), "/search?a=1");
    assert_eq!(add_query_params("/search?q=x", &params), "/search?q=x&a=1");
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn lookup_with_expressions() {
    let query = "page=2&sort=name&ids=1&ids=2";
    assert_eq!(get_query_param(query, "page", None).unwrap(), Some(Value::from(2)));
    assert_eq!(get_query_param(query, "ids[1]", None).unwrap(), Some(Value::from(2)));
    assert_eq!(
        get_query_param(query, "missing", Some(Value::from("d"))).unwrap(),
        Some(Value::from("d"))
    );
    assert_eq!(
        get_query_param(query, "page * 10", None).unwrap(),
        Some(Value::from(20))
    );
}

#[test]
fn extract_as_string_and_mapping() {
    let query = "a=1&b=2&c=3";
    assert_eq!(
        extract_query_params(query, &["a"], true).unwrap(),
        ExtractedParams::Text("?a=1".into())
    );
    let extracted = extract_query_params(query, &["a", "c"], false).unwrap();
    assert_eq!(
        Value::from(extracted),
        obj(vec![("a", Value::from(1)), ("c", Value::from(3))])
    );
}
