//! Error types for validation.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to the message of the first rule that failed for it.
/// Empty means valid.
pub type FieldErrorMap = BTreeMap<String, String>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors produced by the validation adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more fields failed their rules.
    #[error("validation failed: {}", describe(.0))]
    Failed(FieldErrorMap),

    /// The candidate is not an object, or passed every rule but does not
    /// decode into the target type.
    #[error("malformed candidate: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// The per-field errors, if this is a field failure.
    pub fn field_errors(&self) -> Option<&FieldErrorMap> {
        match self {
            Self::Failed(errors) => Some(errors),
            Self::Malformed(_) => None,
        }
    }
}

fn describe(errors: &FieldErrorMap) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
