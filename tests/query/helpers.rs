//! Tests for the query helpers inside expressions

use keypath::expression::Evaluator;
use keypath::foundation::Value;
use keypath::query::query_helpers;

fn obj(entries: Vec<(&str, Value)>) -> Value {
    entries.into_iter().collect()
}

#[test]
fn helpers_read_the_bound_query() {
    let evaluator = Evaluator::new(query_helpers("page=4&q=rust"));
    let context = Value::empty_mapping();
    assert_eq!(
        evaluator.evaluate("getQueryParam('page', 1) + 1", &context, None).unwrap(),
        Some(Value::from(5))
    );
    assert_eq!(
        evaluator.evaluate("parseQuery().q", &context, None).unwrap(),
        Some(Value::from("rust"))
    );
}

#[test]
fn helpers_build_urls_from_context() {
    let evaluator = Evaluator::new(query_helpers(""));
    let context = obj(vec![
        ("base", Value::from("/items")),
        ("filter", obj(vec![("tag", Value::from("new"))])),
    ]);
    assert_eq!(
        evaluator.evaluate("addQueryParams(base, filter)", &context, None).unwrap(),
        Some(Value::from("/items?tag=new"))
    );
}

#[test]
fn extract_helper_keeps_named_params() {
    let evaluator = Evaluator::new(query_helpers("a=1&b=2"));
    let context = obj(vec![("keep", Value::sequence(["b"]))]);
    assert_eq!(
        evaluator.evaluate("extractQueryParams(keep)", &context, None).unwrap(),
        Some(Value::from("?b=2"))
    );
}

#[test]
fn bad_helper_arguments_yield_fallback() {
    let evaluator = Evaluator::new(query_helpers("a=1"));
    let result = evaluator
        .evaluate("extractQueryParams(5)", &Value::empty_mapping(), Some(Value::Null))
        .unwrap();
    assert_eq!(result, Some(Value::Null));
}
