//! Error types for remote resources and forms.

use devconsole_collection::EditError;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Errors talking to the backing store.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// The device answered with an error status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// Nothing is stored at the resource location yet.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why the save action is currently disabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveBlocked {
    /// A save is already in flight.
    #[error("a save is already in progress")]
    InFlight,

    /// The collection violates its invariant.
    #[error("{0}")]
    Invariant(String),

    /// The last error has not been acknowledged yet.
    #[error("unacknowledged error: {0}")]
    Unacknowledged(String),
}

/// Errors from form operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// Nothing has been loaded yet.
    #[error("no data loaded")]
    NotLoaded,

    /// The save action is disabled.
    #[error("save blocked: {0}")]
    SaveBlocked(SaveBlocked),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
