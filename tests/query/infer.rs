//! Tests for query value type inference

use chrono::{TimeZone, Utc};
use keypath::query::{
    QueryConfig, TypedToken, infer_type, infer_type_with, is_boolean, is_date_time, is_numeric,
    str_to_bool,
};

#[test]
fn numbers_before_booleans_before_dates() {
    assert_eq!(infer_type("10"), TypedToken::Number(10.0));
    assert_eq!(infer_type("false"), TypedToken::Boolean(false));
    assert_eq!(
        infer_type("2021-03-04T05:06:07Z"),
        TypedToken::Date(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap())
    );
    assert_eq!(infer_type("10px"), TypedToken::Text("10px".into()));
}

#[test]
fn predicates() {
    assert!(is_numeric("3.25"));
    assert!(!is_numeric("three"));
    assert!(is_boolean("True"));
    assert!(!is_boolean("1"));
    assert!(is_date_time("2021-03-04"));
    assert!(!is_date_time("yesterday"));
}

#[test]
fn bool_with_default() {
    assert!(str_to_bool("TRUE", false));
    assert!(!str_to_bool("nope", false));
}

#[test]
fn dates_can_be_disabled() {
    let config = QueryConfig::default().with_infer_dates(false);
    assert_eq!(
        infer_type_with("2021-03-04", &config),
        TypedToken::Text("2021-03-04".into())
    );
}
