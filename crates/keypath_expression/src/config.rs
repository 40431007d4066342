//! Configuration for the expression evaluator.

/// Configuration for the expression evaluator.
///
/// Controls how deep evaluation may recurse and which names a mapping
/// context contributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Maximum evaluation depth, counted across nested helper calls.
    pub max_depth: usize,

    /// Whether a mapping context's own keys are bound as names.
    pub bind_context_keys: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            bind_context_keys: true,
        }
    }
}

impl EvaluatorConfig {
    /// Creates a configuration where only `this` and helpers are visible.
    #[must_use]
    pub fn this_only() -> Self {
        Self {
            bind_context_keys: false,
            ..Self::default()
        }
    }

    /// Builder method to set the maximum evaluation depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to enable/disable binding of context keys.
    #[must_use]
    pub fn with_bind_context_keys(mut self, bind: bool) -> Self {
        self.bind_context_keys = bind;
        self
    }
}
