//! Tests for the Value type

use chrono::{TimeZone, Utc};
use keypath::foundation::{Mapping, Pattern, Value, format_number};

// =============================================================================
// Truthiness
// =============================================================================

#[test]
fn falsy_values() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::from(0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::from("").is_truthy());
}

#[test]
fn truthy_values() {
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::from(-1).is_truthy());
    assert!(Value::from("0").is_truthy());
    assert!(Value::empty_mapping().is_truthy());
    assert!(Value::sequence(Vec::<Value>::new()).is_truthy());
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn from_primitives() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(3).as_number(), Some(3.0));
    assert_eq!(Value::from("hi").as_str(), Some("hi"));
    assert_eq!(Value::from(None::<i32>), Value::Null);
}

#[test]
fn mapping_from_pairs_keeps_order() {
    let value: Value = [("b", 1), ("a", 2)].into_iter().collect();
    let keys: Vec<&String> = value.as_mapping().unwrap().keys().collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(value.get("a"), Some(&Value::from(2)));
    assert_eq!(value.get("z"), None);
}

#[test]
fn accessors_reject_other_kinds() {
    let value = Value::from(1);
    assert!(value.as_str().is_none());
    assert!(value.as_sequence().is_none());
    assert!(value.as_mapping().is_none());
    assert!(value.get("x").is_none());
}

// =============================================================================
// String conversion
// =============================================================================

#[test]
fn numbers_print_like_script_engines() {
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn extreme_numbers_use_exponent_form() {
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(Value::from(1e21).to_string(), "1e+21");
}

#[test]
fn display_of_containers() {
    assert_eq!(Value::sequence([1, 2]).to_string(), "1,2");
    assert_eq!(
        Value::Sequence(vec![Value::from(1), Value::Null]).to_string(),
        "1,"
    );
    assert_eq!(Value::empty_mapping().to_string(), "[object Object]");
}

#[test]
fn display_of_dates_and_patterns() {
    let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(Value::from(date).to_string(), "2020-01-02T03:04:05.000Z");
    let pattern = Pattern::new("a+", "gi").unwrap();
    assert_eq!(Value::from(pattern).to_string(), "/a+/gi");
}

// =============================================================================
// Error payloads
// =============================================================================

#[test]
fn error_object_needs_all_fields() {
    let mut entries = Mapping::new();
    entries.insert("statusCode".into(), Value::from(404));
    entries.insert("error".into(), Value::from("Not Found"));
    entries.insert("message".into(), Value::from("missing"));
    assert!(Value::Mapping(entries.clone()).is_error_object());

    entries.insert("message".into(), Value::from(""));
    assert!(!Value::Mapping(entries).is_error_object());
    assert!(!Value::from("error").is_error_object());
}
