//! Aggregate invariants that gate saving.
//!
//! Unlike field validation, an invariant is about the collection as a
//! whole. It is not an error: a violated invariant blocks the save action
//! and keeps a warning on screen until a later change restores it.

use crate::collection::Collection;
use devconsole_model::{Entry, User};

/// Warning shown while no user has the admin flag.
pub const NO_ADMIN_MESSAGE: &str = "You must have at least one admin user configured.";

/// A predicate the whole collection must satisfy before it can be saved.
pub trait Invariant<E: Entry>: Send + Sync {
    fn holds(&self, collection: &Collection<E>) -> bool;

    /// User-facing description of the violation.
    fn message(&self) -> &str;
}

/// Holds when at least one entry has a boolean flag set.
pub struct AnyFlagged<E> {
    flag: fn(&E) -> bool,
    message: String,
}

impl<E> AnyFlagged<E> {
    pub fn new(flag: fn(&E) -> bool, message: impl Into<String>) -> Self {
        Self {
            flag,
            message: message.into(),
        }
    }
}

impl<E: Entry> Invariant<E> for AnyFlagged<E> {
    fn holds(&self, collection: &Collection<E>) -> bool {
        collection.iter().any(self.flag)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// At least one user must be an admin.
pub fn admin_required() -> AnyFlagged<User> {
    AnyFlagged::new(|user: &User| user.admin, NO_ADMIN_MESSAGE)
}

/// Whether saving is allowed, and the warning to show if not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateStatus {
    pub saveable: bool,
    pub warning: Option<String>,
}

impl GateStatus {
    /// The status when no invariant applies.
    pub fn open() -> Self {
        Self {
            saveable: true,
            warning: None,
        }
    }

    pub fn evaluate<E: Entry>(invariant: &dyn Invariant<E>, collection: &Collection<E>) -> Self {
        if invariant.holds(collection) {
            Self::open()
        } else {
            Self {
                saveable: false,
                warning: Some(invariant.message().to_string()),
            }
        }
    }
}

impl Default for GateStatus {
    fn default() -> Self {
        Self::open()
    }
}
