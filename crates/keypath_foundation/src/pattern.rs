//! Regular-expression values.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// A regular expression carried as a value.
///
/// Keeps the original `source` and `flags` so that the value can be
/// rebuilt, compared, and rendered as `/source/flags`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern from its source and flag letters.
    ///
    /// `i`, `m` and `s` change matching; `g`, `u`, `y` and `d` are accepted
    /// and preserved but do not affect matching.
    ///
    /// # Errors
    /// Returns an error for an unknown or repeated flag or an invalid
    /// expression.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> crate::Result<Self> {
        let source = source.into();
        let flags = flags.into();

        let mut builder = RegexBuilder::new(&source);
        let mut seen = String::new();
        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(Error::invalid_pattern(format!("repeated flag '{flag}'")));
            }
            seen.push(flag);
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'y' | 'd' => {}
                other => {
                    return Err(Error::invalid_pattern(format!("unknown flag '{other}'")));
                }
            }
        }

        let regex = builder
            .build()
            .map_err(|e| Error::invalid_pattern(e.to_string()))?;
        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the flag letters.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Returns the compiled expression.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns true if the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Builds a fresh pattern with the same source and flags.
    #[must_use]
    pub fn rebuild(&self) -> Self {
        Self::new(self.source.clone(), self.flags.clone()).unwrap_or_else(|_| self.clone())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
