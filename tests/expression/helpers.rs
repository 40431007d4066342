//! Tests for helper registries

use keypath::expression::{Evaluator, HelperCall, HelperRegistry};
use keypath::foundation::{Error, Value};

fn obj(entries: Vec<(&str, Value)>) -> Value {
    entries.into_iter().collect()
}

fn double(args: &[Value], call: &HelperCall<'_>) -> keypath::foundation::Result<Option<Value>> {
    match args.first().and_then(Value::as_number) {
        Some(n) => Ok(Some(Value::from(n * 2.0))),
        None => Err(Error::helper_failed(call.name(), "expected a number")),
    }
}

#[test]
fn standard_registry() {
    let registry = HelperRegistry::standard();
    assert!(registry.contains("getObjectValue"));
    assert_eq!(registry.len(), 1);
    assert!(HelperRegistry::new().is_empty());
}

#[test]
fn registered_helper_is_callable() {
    let evaluator = Evaluator::new(HelperRegistry::new().with("double", double));
    let context = obj(vec![("n", Value::from(21))]);
    assert_eq!(
        evaluator.evaluate("double(n)", &context, None).unwrap(),
        Some(Value::from(42))
    );
}

#[test]
fn failing_helper_yields_fallback() {
    let evaluator = Evaluator::new(HelperRegistry::new().with("double", double));
    let context = obj(vec![("s", Value::from("x"))]);
    let result = evaluator.evaluate("double(s)", &context, Some(Value::from(0))).unwrap();
    assert_eq!(result, Some(Value::from(0)));
}

#[test]
fn unknown_helper_yields_fallback() {
    let evaluator = Evaluator::new(HelperRegistry::new());
    let result = evaluator
        .evaluate("getObjectValue('a', this)", &Value::empty_mapping(), Some(Value::from(1)))
        .unwrap();
    assert_eq!(result, Some(Value::from(1)));
}

#[test]
fn helpers_can_evaluate_nested_expressions() {
    let helpers = HelperRegistry::standard().with("twice", |args: &[Value], call: &HelperCall<'_>| {
        let expr = args.first().map(ToString::to_string).unwrap_or_default();
        let context = args.get(1).cloned().unwrap_or(Value::Null);
        let once = call.evaluate(&expr, &context, None)?;
        Ok(once.map(|v| Value::Sequence(vec![v.clone(), v])))
    });
    let evaluator = Evaluator::new(helpers);
    let context = obj(vec![("inner", obj(vec![("x", Value::from(3))]))]);
    assert_eq!(
        evaluator.evaluate("twice('x', inner)", &context, None).unwrap(),
        Some(Value::sequence([3, 3]))
    );
}

#[test]
fn registries_extend() {
    let mut registry = HelperRegistry::standard();
    registry.extend(&HelperRegistry::new().with("double", double));
    assert_eq!(registry.names(), vec!["double", "getObjectValue"]);
}
