//! Error types for rule configuration.
//!
//! The check engine itself is total: every edge case (missing column, type
//! mismatch, empty table) maps to a defined metric value rather than an
//! error. What can go wrong is the configuration, and these errors surface
//! when a rule set is linted before a run.

use thiserror::Error;

/// Result type for rule-configuration operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// A problem with a configured rule set.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Range bounds that no value can satisfy
    #[error("range for column '{column}' is inverted: min {min} > max {max}")]
    InvertedBounds {
        /// Column the range is configured for
        column: String,
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// An allowed-values check with nothing permitted
    #[error("allowed-values set for column '{column}' is empty")]
    EmptyAllowedSet {
        /// Column the check is configured for
        column: String,
    },

    /// The same column listed twice in the not-null category
    #[error("column '{column}' appears more than once in not_null")]
    DuplicateNotNull {
        /// The duplicated column
        column: String,
    },
}

impl crate::RuleSet {
    /// Lints the rule set for configurations that cannot be satisfied.
    ///
    /// The evaluator accepts any rule set; this is an advisory check run by
    /// the CLI before touching data.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for column in &self.not_null {
            if !seen.insert(column.as_str()) {
                return Err(RuleError::DuplicateNotNull {
                    column: column.clone(),
                });
            }
        }

        for (column, bounds) in &self.numeric_ranges {
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min > max {
                    return Err(RuleError::InvertedBounds {
                        column: column.clone(),
                        min,
                        max,
                    });
                }
            }
        }

        for (column, allowed) in &self.allowed_values {
            if allowed.is_empty() {
                return Err(RuleError::EmptyAllowedSet {
                    column: column.clone(),
                });
            }
        }

        Ok(())
    }
}

impl crate::RuleRegistry {
    /// Lints every rule set in the registry.
    pub fn validate(&self) -> Result<()> {
        for (_, rules) in self.iter() {
            rules.validate()?;
        }
        Ok(())
    }
}
