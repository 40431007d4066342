//! Tests for Kind classification and Pattern values

use chrono::Utc;
use keypath::foundation::{Kind, Pattern, Value, classify};

// =============================================================================
// Classification
// =============================================================================

#[test]
fn classify_every_variant() {
    assert_eq!(classify(&Value::Null), Kind::Null);
    assert_eq!(classify(&Value::from(true)), Kind::Boolean);
    assert_eq!(classify(&Value::from(1)), Kind::Number);
    assert_eq!(classify(&Value::from("s")), Kind::String);
    assert_eq!(classify(&Value::from(Utc::now())), Kind::Date);
    assert_eq!(classify(&Value::from(Pattern::new("x", "").unwrap())), Kind::Regex);
    assert_eq!(classify(&Value::sequence([1])), Kind::Array);
    assert_eq!(classify(&Value::empty_mapping()), Kind::Object);
}

#[test]
fn kind_names() {
    assert_eq!(Kind::Array.name(), "array");
    assert_eq!(Kind::Regex.to_string(), "regex");
    assert_eq!(Value::Null.type_name(), "null");
}

#[test]
fn object_like_and_primitive_partition() {
    for kind in [Kind::Null, Kind::Array, Kind::Date, Kind::Regex, Kind::Object] {
        assert!(kind.is_object_like());
        assert!(!kind.is_primitive());
    }
    for kind in [Kind::Boolean, Kind::Number, Kind::String] {
        assert!(kind.is_primitive());
        assert!(!kind.is_object_like());
    }
}

// =============================================================================
// Patterns
// =============================================================================

#[test]
fn pattern_flags_change_matching() {
    let plain = Pattern::new("abc", "").unwrap();
    let folded = Pattern::new("abc", "i").unwrap();
    assert!(!plain.is_match("ABC"));
    assert!(folded.is_match("xABCx"));
}

#[test]
fn pattern_rejects_bad_input() {
    assert!(Pattern::new("(", "").is_err());
    assert!(Pattern::new("a", "q").is_err());
    assert!(Pattern::new("a", "ii").is_err());
}

#[test]
fn patterns_compare_by_source_and_flags() {
    let a = Pattern::new("a", "g").unwrap();
    assert_eq!(a, Pattern::new("a", "g").unwrap());
    assert_ne!(a, Pattern::new("a", "i").unwrap());
    assert_eq!(a.rebuild(), a);
}
