//! Tests for path parsing and resolution

use keypath::expression::{parse_path, resolve_path};
use keypath::foundation::Value;

#[test]
fn mixed_path_segments() {
    assert_eq!(
        parse_path(r#"foo.bar[0]."biz-baz""#),
        vec!["foo", "bar", "0", "biz-baz"]
    );
}

#[test]
fn bracketed_quoted_keys() {
    assert_eq!(parse_path("items['a.b'][2]"), vec!["items", "a.b", "2"]);
}

#[test]
fn parsed_paths_resolve() {
    let value: Value = [(
        "user",
        [("tags", Value::sequence(["x", "y"]))]
            .into_iter()
            .collect::<Value>(),
    )]
    .into_iter()
    .collect();

    assert_eq!(
        resolve_path(&value, &parse_path("user.tags[1]")),
        Some(&Value::from("y"))
    );
    assert_eq!(resolve_path(&value, &parse_path("user.name")), None);
}
