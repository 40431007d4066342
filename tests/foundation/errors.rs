//! Tests for error types

use keypath::foundation::{Error, ErrorContext, ErrorKind};

#[test]
fn compile_error_message() {
    let err = Error::compile("unexpected token", 1, 5, "a + )".into());
    assert!(err.is_compile());
    assert_eq!(err.to_string(), "compile error at 1:5: unexpected token");
}

#[test]
fn runtime_error_messages() {
    assert_eq!(Error::undefined_binding("foo").to_string(), "foo is not defined");
    assert_eq!(
        Error::null_access("bar", "undefined").to_string(),
        "cannot read property 'bar' of undefined"
    );
    assert_eq!(
        Error::type_mismatch("-", "array").to_string(),
        "type mismatch: cannot apply - to array"
    );
    assert_eq!(
        Error::new(ErrorKind::NotCallable("x".into())).to_string(),
        "x is not a function"
    );
    assert_eq!(
        Error::new(ErrorKind::DepthExceeded(8)).to_string(),
        "maximum evaluation depth (8) exceeded"
    );
}

#[test]
fn only_compile_errors_are_compile() {
    assert!(!Error::helper_failed("h", "bad").is_compile());
    assert!(!Error::invalid_pattern("x").is_compile());
}

#[test]
fn error_context_builders() {
    let context = ErrorContext::new()
        .with_source("foo(")
        .with_position(1, 5)
        .with_frame("getObjectValue");
    let err = Error::undefined_binding("foo").with_context(context);

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("foo("));
    assert_eq!((context.line, context.column), (Some(1), Some(5)));
    assert_eq!(context.stack, vec!["getObjectValue"]);
}
