//! Range checks for configuration values.
//!
//! [`Checks`] collects every problem in a config instead of stopping at the
//! first, so a user fixing a hand-edited file sees them all at once.
//!
//! # Example
//!
//! ```rust
//! use faderkit_config::validation::{Checks, ValidationError};
//!
//! let mut checks = Checks::new();
//! checks.range("feel.sensitivity", 0.5, 0.0001, 0.1);
//! checks.bounds("feel.pulse_width", 0.2, 0.8);
//! assert!(matches!(checks.finish(), Err(ValidationError::OutOfRange { .. })));
//! ```

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value lies outside its allowed range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted path of the offending field.
        field: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// A lower bound is not below its upper bound.
    #[error("'{field}' bounds inverted: min {min} >= max {max}")]
    InvertedBounds {
        /// Dotted path of the bound pair.
        field: String,
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", join_errors(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accumulates validation failures.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    /// An empty set of failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `min <= value <= max`. NaN always fails.
    pub fn range(&mut self, field: &str, value: f32, min: f32, max: f32) -> &mut Self {
        if !(min..=max).contains(&value) {
            self.errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
        self
    }

    /// Require `min < max`.
    pub fn bounds(&mut self, field: &str, min: f32, max: f32) -> &mut Self {
        if min.is_nan() || max.is_nan() || min >= max {
            self.errors.push(ValidationError::InvertedBounds {
                field: field.to_string(),
                min,
                max,
            });
        }
        self
    }

    /// Number of failures so far.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing has failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing failed, the single error when one did, otherwise
    /// [`ValidationError::Multiple`].
    pub fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}
