//! Error types for edit sessions.

use devconsole_validate::ValidationError;
use thiserror::Error;

/// Result type for collection edits.
pub type EditResult<T> = Result<T, EditError>;

/// Errors from collection edit transitions.
#[derive(Debug, Error)]
pub enum EditError {
    /// A create or edit is already in progress.
    #[error("an edit session is already active")]
    SessionActive,

    /// The transition needs an active create or edit.
    #[error("no edit session is active")]
    NoSession,

    /// No entry has this key.
    #[error("no entry with key {0:?}")]
    UnknownKey(String),

    /// The draft failed validation. The session stays open.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An entry could not be converted to its draft form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditError {
    /// Per-field errors, when this is a field validation failure.
    pub fn field_errors(&self) -> Option<&devconsole_validate::FieldErrorMap> {
        match self {
            Self::Validation(e) => e.field_errors(),
            _ => None,
        }
    }
}
