//! Error types for the Keypath system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Only expression evaluation can fail; structural operations and the
//! query codec are total over their input domain.

use std::fmt;

use thiserror::Error;

/// The main error type for Keypath operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a compile error at the given position.
    #[must_use]
    pub fn compile(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::Compile {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an undefined binding error.
    #[must_use]
    pub fn undefined_binding(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedBinding(name.into()))
    }

    /// Creates a type mismatch error for an argument of the wrong kind.
    #[must_use]
    pub fn type_mismatch(operation: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: operation.into(),
            actual: actual.into(),
        })
    }

    /// Creates an error for property access on `null` or `undefined`.
    #[must_use]
    pub fn null_access(property: impl Into<String>, target: &'static str) -> Self {
        Self::new(ErrorKind::NullAccess {
            property: property.into(),
            target,
        })
    }

    /// Creates an error for a helper that rejected its arguments.
    #[must_use]
    pub fn helper_failed(helper: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HelperFailed {
            helper: helper.into(),
            message: message.into(),
        })
    }

    /// Creates an invalid regular expression error.
    #[must_use]
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern(message.into()))
    }

    /// Returns true if this error was raised while compiling an expression.
    ///
    /// Compile errors are surfaced to callers; every other kind raised by the
    /// evaluator is recovered into the caller's fallback value.
    #[must_use]
    pub const fn is_compile(&self) -> bool {
        matches!(self.kind, ErrorKind::Compile { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Expression text could not be compiled.
    #[error("compile error at {line}:{column}: {message}")]
    Compile {
        /// Description of the compile error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Identifier was not bound in the evaluation environment.
    #[error("{0} is not defined")]
    UndefinedBinding(String),

    /// Helper argument of the wrong kind.
    #[error("type mismatch: cannot apply {operation} to {actual}")]
    TypeMismatch {
        /// The helper or operation name.
        operation: String,
        /// Type name of the offending operand.
        actual: String,
    },

    /// Property read on `null` or `undefined`.
    #[error("cannot read property '{property}' of {target}")]
    NullAccess {
        /// The property being read.
        property: String,
        /// Either `null` or `undefined`.
        target: &'static str,
    },

    /// Called something that is not a function.
    #[error("{0} is not a function")]
    NotCallable(String),

    /// Injected helper rejected its arguments.
    #[error("helper {helper} failed: {message}")]
    HelperFailed {
        /// Helper name.
        helper: String,
        /// Description of the failure.
        message: String,
    },

    /// Evaluation nested deeper than the configured limit.
    #[error("maximum evaluation depth ({0}) exceeded")]
    DepthExceeded(usize),

    /// Regular expression could not be constructed.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Expression source text.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Chain of helper calls active when the error occurred.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source expression.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in `{source}`")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, " at {line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
