//! Expression evaluator.
//!
//! Interprets an [`Expr`] against a context value. A mapping context's own
//! keys are bound as names, `this` is the context itself, and calls resolve
//! through the evaluator's [`HelperRegistry`].
//!
//! Compile errors are returned to the caller. Every other failure is logged
//! and replaced by the caller's fallback.

use std::borrow::Cow;
use std::sync::LazyLock;

use keypath_foundation::{Error, ErrorContext, ErrorKind, Mapping, Result, Value};
use tracing::{Level, debug, trace};

use crate::ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::coerce;
use crate::config::EvaluatorConfig;
use crate::helpers::{HelperCall, HelperRegistry};
use crate::lexer::is_identifier;
use crate::parser::{compile, source_line};

/// Result of evaluating a node; `None` is `undefined`.
type Slot<'a> = Option<Cow<'a, Value>>;

/// Names visible to an expression.
struct Scope<'a> {
    this: &'a Value,
    bindings: Option<&'a Mapping>,
}

/// Expression evaluator over a fixed helper registry.
#[derive(Clone, Debug)]
pub struct Evaluator {
    helpers: HelperRegistry,
    config: EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(HelperRegistry::standard())
    }
}

impl Evaluator {
    /// Creates an evaluator with the given helpers and default config.
    #[must_use]
    pub fn new(helpers: HelperRegistry) -> Self {
        Self {
            helpers,
            config: EvaluatorConfig::default(),
        }
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the helper registry.
    #[must_use]
    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates `expr` against `context`.
    ///
    /// Returns `Ok(None)` for `undefined`. Evaluation failures produce
    /// `Ok(fallback)`.
    ///
    /// # Errors
    /// Returns a compile error if `expr` is malformed, or if `context` is
    /// `null` or a scalar and `expr` refers to any name.
    pub fn evaluate(&self, expr: &str, context: &Value, fallback: Option<Value>) -> Result<Option<Value>> {
        self.evaluate_at(expr, context, fallback, 0)
    }

    /// Evaluates an already compiled expression without recovering from
    /// failures.
    ///
    /// # Errors
    /// Returns the evaluation error the expression raised.
    pub fn evaluate_expr(&self, expr: &Expr, context: &Value) -> Result<Option<Value>> {
        let scope = self.scope(context);
        Ok(self.eval(expr, &scope, 0)?.map(Cow::into_owned))
    }

    pub(crate) fn evaluate_at(
        &self,
        expr: &str,
        context: &Value,
        fallback: Option<Value>,
        depth: usize,
    ) -> Result<Option<Value>> {
        let tree = compile(expr).map_err(|e| with_source(e, expr))?;

        if !is_object_kind(context) {
            if let Some((name, span)) = tree.first_free_name() {
                let message = format!(
                    "{name} cannot be resolved against a {} context",
                    context.type_name()
                );
                let error = Error::compile(message, span.line, span.column, source_line(expr, span));
                return Err(with_source(error, expr));
            }
        }

        let scope = self.scope(context);
        if let Some(entries) = scope.bindings {
            trace_unbindable_keys(entries);
        }

        match self.eval(&tree, &scope, depth) {
            Ok(value) => Ok(value.map(Cow::into_owned)),
            Err(error) => {
                if fallback.is_some() {
                    debug!(expression = expr, %error, "evaluation failed, using fallback");
                } else {
                    trace!(expression = expr, %error, "evaluation failed");
                }
                Ok(fallback)
            }
        }
    }

    fn scope<'a>(&self, context: &'a Value) -> Scope<'a> {
        let bindings = if self.config.bind_context_keys {
            context.as_mapping()
        } else {
            None
        };
        Scope {
            this: context,
            bindings,
        }
    }

    fn eval<'a>(&self, expr: &'a Expr, scope: &Scope<'a>, depth: usize) -> Result<Slot<'a>> {
        if depth > self.config.max_depth {
            return Err(Error::new(ErrorKind::DepthExceeded(self.config.max_depth)));
        }
        let next = depth + 1;

        match expr {
            Expr::Literal(value, _) => Ok(Some(Cow::Borrowed(value))),
            Expr::Undefined(_) => Ok(None),
            Expr::This(_) => Ok(Some(Cow::Borrowed(scope.this))),
            Expr::Identifier(name, _) => self.lookup(name, scope).map(Some),
            Expr::Member {
                object, property, ..
            } => {
                let target = self.eval(object, scope, next)?;
                property_of(target, property)
            }
            Expr::Index { object, index, .. } => {
                let target = self.eval(object, scope, next)?;
                let key = coerce::to_text(self.eval(index, scope, next)?.as_deref());
                property_of(target, &key)
            }
            Expr::Call { callee, args, .. } => self.call(callee, args, scope, depth),
            Expr::Unary { op, operand, .. } => {
                let value = self.eval(operand, scope, next)?;
                let value = value.as_deref();
                let result = match op {
                    UnaryOp::Not => Value::Bool(!truthy(value)),
                    UnaryOp::Negate => Value::Number(-coerce::to_number(value)),
                    UnaryOp::Plus => Value::Number(coerce::to_number(value)),
                };
                Ok(Some(Cow::Owned(result)))
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                let left = self.eval(left, scope, next)?;
                let right = self.eval(right, scope, next)?;
                let result = binary(*op, left.as_deref(), right.as_deref());
                Ok(Some(Cow::Owned(result)))
            }
            Expr::Logical {
                op, left, right, ..
            } => {
                let left = self.eval(left, scope, next)?;
                let short_circuit = match op {
                    LogicalOp::And => !truthy(left.as_deref()),
                    LogicalOp::Or => truthy(left.as_deref()),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval(right, scope, next)
                }
            }
        }
    }

    fn lookup<'a>(&self, name: &str, scope: &Scope<'a>) -> Result<Cow<'a, Value>> {
        if let Some(value) = scope.bindings.and_then(|b| b.get(name)) {
            return Ok(Cow::Borrowed(value));
        }
        if self.helpers.contains(name) {
            return Err(Error::helper_failed(name, "helpers can only be called"));
        }
        Err(Error::undefined_binding(name))
    }

    fn call<'a>(&self, callee: &str, args: &'a [Expr], scope: &Scope<'a>, depth: usize) -> Result<Slot<'a>> {
        if scope.bindings.is_some_and(|b| b.contains_key(callee)) {
            return Err(Error::new(ErrorKind::NotCallable(callee.to_string())));
        }
        let Some(helper) = self.helpers.get(callee) else {
            return Err(Error::undefined_binding(callee));
        };

        let values = args
            .iter()
            .map(|arg| {
                self.eval(arg, scope, depth + 1)
                    .map(|v| v.map_or(Value::Null, Cow::into_owned))
            })
            .collect::<Result<Vec<_>>>()?;

        let call = HelperCall::new(self, callee, depth);
        let result = helper(&values, &call).map_err(|e| in_frame(e, callee))?;
        Ok(result.map(Cow::Owned))
    }
}

/// Evaluates `expr` against `context` with the standard helpers.
///
/// # Errors
/// Returns a compile error if `expr` is malformed; see
/// [`Evaluator::evaluate`].
pub fn evaluate(expr: &str, context: &Value, fallback: Option<Value>) -> Result<Option<Value>> {
    static STANDARD: LazyLock<Evaluator> = LazyLock::new(Evaluator::default);
    STANDARD.evaluate(expr, context, fallback)
}

/// Looks up `path` in `obj`, returning `fallback` when it cannot be
/// evaluated.
///
/// # Errors
/// Returns a compile error if `path` is malformed.
pub fn get_object_value(path: &str, obj: &Value, fallback: Option<Value>) -> Result<Option<Value>> {
    evaluate(path, obj, fallback)
}

/// True for contexts whose keys or `this` an expression may use.
const fn is_object_kind(value: &Value) -> bool {
    matches!(
        value,
        Value::Sequence(_) | Value::Mapping(_) | Value::DateTime(_) | Value::Pattern(_)
    )
}

fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_truthy)
}

fn trace_unbindable_keys(entries: &Mapping) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    for key in entries.keys().filter(|key| !is_identifier(key)) {
        trace!(key = key.as_str(), "context key is not bindable as a name");
    }
}

fn binary(op: BinaryOp, left: Option<&Value>, right: Option<&Value>) -> Value {
    use std::cmp::Ordering::{Equal, Greater, Less};

    match op {
        BinaryOp::Add => {
            if coerce::concatenates(left) || coerce::concatenates(right) {
                let mut text = coerce::to_text(left);
                text.push_str(&coerce::to_text(right));
                Value::Text(text)
            } else {
                Value::Number(coerce::to_number(left) + coerce::to_number(right))
            }
        }
        BinaryOp::Sub => Value::Number(coerce::to_number(left) - coerce::to_number(right)),
        BinaryOp::Mul => Value::Number(coerce::to_number(left) * coerce::to_number(right)),
        BinaryOp::Div => Value::Number(coerce::to_number(left) / coerce::to_number(right)),
        BinaryOp::Rem => Value::Number(coerce::to_number(left) % coerce::to_number(right)),
        BinaryOp::Lt => Value::Bool(matches!(coerce::compare(left, right), Some(Less))),
        BinaryOp::Le => Value::Bool(matches!(coerce::compare(left, right), Some(Less | Equal))),
        BinaryOp::Gt => Value::Bool(matches!(coerce::compare(left, right), Some(Greater))),
        BinaryOp::Ge => Value::Bool(matches!(
            coerce::compare(left, right),
            Some(Greater | Equal)
        )),
        BinaryOp::LooseEq => Value::Bool(coerce::loose_equal(left, right)),
        BinaryOp::LooseNe => Value::Bool(!coerce::loose_equal(left, right)),
        BinaryOp::StrictEq => Value::Bool(coerce::strict_equal(left, right)),
        BinaryOp::StrictNe => Value::Bool(!coerce::strict_equal(left, right)),
    }
}

/// Reads `key` from `target`, keeping borrows borrowed.
fn property_of<'a>(target: Slot<'a>, key: &str) -> Result<Slot<'a>> {
    match target {
        None => Err(Error::null_access(key, "undefined")),
        Some(Cow::Borrowed(value)) => property_ref(value, key),
        Some(Cow::Owned(value)) => {
            Ok(property_ref(&value, key)?.map(|found| Cow::Owned(found.into_owned())))
        }
    }
}

fn property_ref<'a>(value: &'a Value, key: &str) -> Result<Slot<'a>> {
    let found = match value {
        Value::Null => return Err(Error::null_access(key, "null")),
        Value::Mapping(entries) => entries.get(key).map(Cow::Borrowed),
        Value::Sequence(items) => {
            if key == "length" {
                Some(Cow::Owned(Value::from(items.len())))
            } else {
                array_index(key)
                    .and_then(|i| items.get(i))
                    .map(Cow::Borrowed)
            }
        }
        Value::Text(text) => {
            if key == "length" {
                Some(Cow::Owned(Value::from(text.encode_utf16().count())))
            } else {
                array_index(key)
                    .and_then(|i| text.encode_utf16().nth(i))
                    .map(|unit| Cow::Owned(Value::Text(String::from_utf16_lossy(&[unit]))))
            }
        }
        Value::Pattern(pattern) => match key {
            "source" => Some(Cow::Owned(Value::from(pattern.source()))),
            "flags" => Some(Cow::Owned(Value::from(pattern.flags()))),
            "global" => Some(Cow::Owned(Value::Bool(pattern.flags().contains('g')))),
            "ignoreCase" => Some(Cow::Owned(Value::Bool(pattern.flags().contains('i')))),
            "multiline" => Some(Cow::Owned(Value::Bool(pattern.flags().contains('m')))),
            _ => None,
        },
        Value::Bool(_) | Value::Number(_) | Value::DateTime(_) => None,
    };
    Ok(found)
}

/// Parses a canonical array index: decimal digits, no sign, no leading zero.
fn array_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

fn with_source(error: Error, expr: &str) -> Error {
    let position = match &error.kind {
        ErrorKind::Compile { line, column, .. } => Some((*line as usize, *column as usize)),
        _ => None,
    };
    let mut context = ErrorContext::new().with_source(expr);
    if let Some((line, column)) = position {
        context = context.with_position(line, column);
    }
    error.with_context(context)
}

/// Records a helper frame on an error raised inside that helper.
///
/// A compile error from a nested expression happened while the outer one
/// was running, so it becomes a helper failure.
fn in_frame(error: Error, helper: &str) -> Error {
    let Error { kind, context } = error;
    let kind = match kind {
        ErrorKind::Compile { .. } => ErrorKind::HelperFailed {
            helper: helper.to_string(),
            message: kind.to_string(),
        },
        other => other,
    };
    Error::new(kind).with_context(context.unwrap_or_default().with_frame(helper))
}
