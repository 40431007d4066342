//! Registry of helper functions callable from expressions.
//!
//! Helpers are the only functions an expression can call. The registry is
//! handed to the [`Evaluator`] explicitly; nothing is looked up ambiently.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use keypath_foundation::{Result, Value};

use crate::evaluator::Evaluator;

/// Signature shared by every helper.
///
/// Helpers receive their evaluated arguments (an `undefined` argument
/// arrives as `null`) and return `None` for `undefined`.
pub type HelperFn = dyn Fn(&[Value], &HelperCall<'_>) -> Result<Option<Value>> + Send + Sync;

// =============================================================================
// HelperCall
// =============================================================================

/// The evaluator state a helper is invoked under.
///
/// Helpers that evaluate expressions themselves go through
/// [`HelperCall::evaluate`] so the depth limit spans the whole call chain.
pub struct HelperCall<'a> {
    evaluator: &'a Evaluator,
    name: &'a str,
    depth: usize,
}

impl<'a> HelperCall<'a> {
    pub(crate) const fn new(evaluator: &'a Evaluator, name: &'a str, depth: usize) -> Self {
        Self {
            evaluator,
            name,
            depth,
        }
    }

    /// Returns the evaluator running the current expression.
    #[must_use]
    pub const fn evaluator(&self) -> &'a Evaluator {
        self.evaluator
    }

    /// Returns the name the helper was called by.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the evaluation depth of the call.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluates a nested expression one level deeper than this call.
    ///
    /// # Errors
    /// Returns a compile error if `expr` does not compile, or
    /// `DepthExceeded` if the nesting limit is reached.
    pub fn evaluate(&self, expr: &str, context: &Value, fallback: Option<Value>) -> Result<Option<Value>> {
        self.evaluator
            .evaluate_at(expr, context, fallback, self.depth + 1)
    }
}

// =============================================================================
// HelperRegistry
// =============================================================================

/// Registry for storing and looking up helpers by name.
#[derive(Clone, Default)]
pub struct HelperRegistry {
    /// Map from name to helper.
    helpers: HashMap<String, Arc<HelperFn>>,
}

impl HelperRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `getObjectValue` pre-registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("getObjectValue", get_object_value_helper);
        registry
    }

    /// Registers a helper, replacing any helper of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, helper: F)
    where
        F: Fn(&[Value], &HelperCall<'_>) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
    }

    /// Builder form of [`HelperRegistry::register`].
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&[Value], &HelperCall<'_>) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.register(name, helper);
        self
    }

    /// Copies every helper of `other` into this registry.
    ///
    /// Helpers from `other` replace same-named ones already present.
    pub fn extend(&mut self, other: &Self) {
        self.helpers
            .extend(other.helpers.iter().map(|(k, v)| (k.clone(), Arc::clone(v))));
    }

    /// Looks up a helper by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<HelperFn>> {
        self.helpers.get(name)
    }

    /// Checks if a helper is registered under the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Returns all registered helper names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered helpers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Returns true if no helpers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// `getObjectValue(path, obj, fallback?)`
fn get_object_value_helper(args: &[Value], call: &HelperCall<'_>) -> Result<Option<Value>> {
    let path = args.first().map_or_else(|| "undefined".to_string(), ToString::to_string);
    let context = args.get(1).unwrap_or(&Value::Null);
    call.evaluate(&path, context, args.get(2).cloned())
}

// =============================================================================
// Tests
// =============================================================================
