//! Configuration for query-string decoding.

/// Configuration for query-string decoding.
///
/// Controls how values are typed and how bracketed keys are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    /// Whether values are inferred as numbers, booleans and dates.
    pub infer_types: bool,

    /// Whether date inference is attempted (only with `infer_types`).
    pub infer_dates: bool,

    /// Whether `a[b]=1` decodes into nested mappings.
    pub nested_keys: bool,

    /// Most bracket segments read from one key. The rest of the key is
    /// kept as a single literal segment.
    pub max_depth: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            infer_types: true,
            infer_dates: true,
            nested_keys: true,
            max_depth: 16,
        }
    }
}

impl QueryConfig {
    /// Creates a configuration that keeps every value as text.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            infer_types: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that keeps bracketed keys as written.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            nested_keys: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable type inference.
    #[must_use]
    pub fn with_infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }

    /// Builder method to enable/disable date inference.
    #[must_use]
    pub fn with_infer_dates(mut self, infer: bool) -> Self {
        self.infer_dates = infer;
        self
    }

    /// Builder method to enable/disable bracket-key nesting.
    #[must_use]
    pub fn with_nested_keys(mut self, nested: bool) -> Self {
        self.nested_keys = nested;
        self
    }

    /// Builder method to set the bracket depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
