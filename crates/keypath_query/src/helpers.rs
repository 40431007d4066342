//! Query-codec helpers for expressions.

use std::sync::Arc;

use keypath_expression::{HelperCall, HelperRegistry};
use keypath_foundation::{Error, Result, Value};

use crate::codec::{add_query_params, extract_from, make_query_params, parse_query};

/// Returns the standard helpers plus the query helpers, bound to `query`.
///
/// Registered names: `parseQuery(str?)`, `getQueryParam(name, fallback?)`,
/// `makeQueryParams(obj, prefix?)`, `addQueryParams(url, obj)` and
/// `extractQueryParams(names, asString?)`. The helpers that read a query
/// use `query` unless given one explicitly.
#[must_use]
pub fn query_helpers(query: &str) -> HelperRegistry {
    let query: Arc<str> = Arc::from(query);
    let mut registry = HelperRegistry::standard();

    let bound = Arc::clone(&query);
    registry.register("parseQuery", move |args: &[Value], _: &HelperCall<'_>| {
        let source = args.first().and_then(Value::as_str).unwrap_or(&bound);
        Ok(Some(Value::Mapping(parse_query(source))))
    });

    let bound = Arc::clone(&query);
    registry.register("getQueryParam", move |args: &[Value], call: &HelperCall<'_>| {
        let name = text_arg(args, 0, call)?;
        let params = Value::Mapping(parse_query(&bound));
        call.evaluate(&name, &params, args.get(1).cloned())
    });

    registry.register("makeQueryParams", |args: &[Value], _: &HelperCall<'_>| {
        let params = args.first().unwrap_or(&Value::Null);
        let prefix = args.get(1).and_then(Value::as_str);
        Ok(Some(Value::Text(make_query_params(params, prefix))))
    });

    registry.register("addQueryParams", |args: &[Value], call: &HelperCall<'_>| {
        let url = text_arg(args, 0, call)?;
        let params = args.get(1).unwrap_or(&Value::Null);
        Ok(Some(Value::Text(add_query_params(&url, params))))
    });

    registry.register("extractQueryParams", move |args: &[Value], call: &HelperCall<'_>| {
        let names = match args.first() {
            Some(Value::Sequence(names)) => names,
            Some(other) => return Err(Error::type_mismatch(call.name(), other.type_name())),
            None => return Err(Error::helper_failed(call.name(), "missing argument 1")),
        };
        let names: Vec<String> = names.iter().map(ToString::to_string).collect();
        let as_string = args.get(1).is_none_or(Value::is_truthy);
        let params = Value::Mapping(parse_query(&query));
        let extracted = extract_from(&params, &names, as_string, |name, params| {
            call.evaluate(name, params, None)
        })?;
        Ok(Some(extracted.into()))
    });

    registry
}

/// Reads argument `index` as text; a missing argument is an error.
fn text_arg(args: &[Value], index: usize, call: &HelperCall<'_>) -> Result<String> {
    args.get(index)
        .map(ToString::to_string)
        .ok_or_else(|| Error::helper_failed(call.name(), format!("missing argument {}", index + 1)))
}
