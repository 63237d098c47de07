//! Working copy of a remotely stored collection.
//!
//! A [`CollectionEditor`] owns the local [`Collection`] and at most one
//! [`EditSession`]. Create and edit actions fill the session's draft;
//! `commit` validates the draft and merges it into the collection by key.
//! Deletion is immediate. Nothing here talks to the backend: the working
//! copy only reaches the device through an explicit save.
//!
//! After every change to the collection the editor re-evaluates its
//! [`Invariant`], producing the [`GateStatus`] that enables or blocks
//! saving.
//!
//! # Example
//!
//! ```
//! use devconsole_collection::{Collection, CollectionEditor, admin_required};
//! use devconsole_model::User;
//! use devconsole_validate::forms::user_rules;
//! use std::sync::Arc;
//!
//! let users = Collection::from_entries([User::new("admin", "admin", true)]);
//! let mut editor = CollectionEditor::new(users, user_rules())
//!     .with_invariant(Arc::new(admin_required()));
//!
//! editor.remove_by_key("admin").unwrap();
//! assert!(!editor.gate().saveable);
//! ```

mod collection;
mod editor;
mod error;
mod gate;
mod session;

pub use collection::Collection;
pub use editor::CollectionEditor;
pub use error::{EditError, EditResult};
pub use gate::{AnyFlagged, GateStatus, Invariant, NO_ADMIN_MESSAGE, admin_required};
pub use session::{EditSession, SessionMode};
