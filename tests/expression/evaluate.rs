//! Tests for expression evaluation

use keypath::expression::{Evaluator, EvaluatorConfig, compile, evaluate, get_object_value};
use keypath::foundation::{ErrorKind, Value};

fn obj(entries: Vec<(&str, Value)>) -> Value {
    entries.into_iter().collect()
}

fn eval(expr: &str, context: &Value) -> Option<Value> {
    evaluate(expr, context, None).expect("compiles")
}

// =============================================================================
// Name binding
// =============================================================================

#[test]
fn names_resolve_against_context_keys() {
    let context = obj(vec![("foo", obj(vec![("bar", Value::from(1))]))]);
    assert_eq!(eval("foo", &context), context.get("foo").cloned());
    assert_eq!(eval("foo.bar", &context), Some(Value::from(1)));
    assert_eq!(eval("this.foo.bar", &context), Some(Value::from(1)));
}

#[test]
fn missing_name_yields_fallback() {
    let context = obj(vec![("foo", Value::from(1))]);
    let result = evaluate("nonexistent", &context, Some(Value::from("fallback"))).unwrap();
    assert_eq!(result, Some(Value::from("fallback")));
}

#[test]
fn missing_property_is_undefined() {
    let context = obj(vec![("foo", Value::empty_mapping())]);
    assert_eq!(eval("foo.nope", &context), None);
    let result = evaluate("foo.nope", &context, Some(Value::from(1))).unwrap();
    assert_eq!(result, None);
}

#[test]
fn property_of_null_yields_fallback() {
    let context = obj(vec![("foo", Value::Null)]);
    let result = evaluate("foo.bar.baz", &context, Some(Value::from(0))).unwrap();
    assert_eq!(result, Some(Value::from(0)));
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn computed_index() {
    let context = obj(vec![("arr", Value::sequence([5, 6, 7]))]);
    assert_eq!(eval("arr[arr.length - 1]", &context), Some(Value::from(7)));
}

#[test]
fn default_with_or() {
    let context = obj(vec![("name", Value::from(""))]);
    assert_eq!(eval("name || 'anonymous'", &context), Some(Value::from("anonymous")));
}

#[test]
fn conditional_arithmetic() {
    let context = obj(vec![("count", Value::from(3)), ("unit", Value::from("item"))]);
    assert_eq!(eval("count + ' ' + unit", &context), Some(Value::from("3 item")));
    assert_eq!(eval("count >= 3 && count < 10", &context), Some(Value::Bool(true)));
    assert_eq!(eval("(count + 1) * 2", &context), Some(Value::from(8)));
}

#[test]
fn containers_compare_structurally() {
    let context = obj(vec![
        ("a", Value::sequence([1, 2])),
        ("b", Value::sequence([1, 2])),
    ]);
    assert_eq!(eval("a === b", &context), Some(Value::Bool(true)));
}

// =============================================================================
// Compile errors
// =============================================================================

#[test]
fn malformed_expression_is_an_error() {
    let err = evaluate("foo..bar", &Value::empty_mapping(), Some(Value::Null)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Compile { .. }));
}

#[test]
fn compile_error_positions() {
    let err = compile("1 +\n  * 2").unwrap_err();
    match err.kind {
        ErrorKind::Compile { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, 3);
        }
        other => panic!("expected compile error, got {other:?}"),
    }
}

#[test]
fn names_against_scalar_context_do_not_compile() {
    let err = evaluate("foo", &Value::from(1), None).unwrap_err();
    assert!(err.is_compile());
}

#[test]
fn host_code_is_not_reachable() {
    for source in ["process.exit()", "foo.constructor('x')()", "this.toString()"] {
        let err = compile(source).unwrap_err();
        assert!(err.is_compile(), "{source}");
    }
}

#[test]
fn overlong_chains_do_not_compile() {
    let sum = format!("1{}", "+1".repeat(200_000));
    let err = evaluate(&sum, &Value::empty_mapping(), Some(Value::from("fb"))).unwrap_err();
    assert!(err.is_compile());

    let members = format!("this{}", ".a".repeat(200_000));
    let err = evaluate(&members, &Value::from(3), Some(Value::from("fb"))).unwrap_err();
    assert!(err.is_compile());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn this_only_evaluator() {
    let evaluator = Evaluator::default().with_config(EvaluatorConfig::this_only());
    let context = obj(vec![("foo", Value::from(1))]);
    let result = evaluator.evaluate("foo", &context, Some(Value::from(9))).unwrap();
    assert_eq!(result, Some(Value::from(9)));
    assert_eq!(
        evaluator.evaluate("this.foo", &context, None).unwrap(),
        Some(Value::from(1))
    );
}

#[test]
fn get_object_value_matches_evaluate() {
    let context = obj(vec![("a", obj(vec![("b", Value::from(2))]))]);
    assert_eq!(get_object_value("a.b", &context, None).unwrap(), Some(Value::from(2)));
    assert_eq!(
        get_object_value("a.c", &context, Some(Value::from(0))).unwrap(),
        None
    );
    assert_eq!(
        get_object_value("x.c", &context, Some(Value::from(0))).unwrap(),
        Some(Value::from(0))
    );
}
