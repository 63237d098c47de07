//! The collection edit state machine.
//!
//! ```text
//! Idle ──start_create──▶ Creating ──commit|cancel──▶ Idle
//! Idle ──start_edit(k)─▶ Editing(k) ─commit|cancel──▶ Idle
//! Idle ──remove_by_key─▶ Idle
//! ```
//!
//! A failed commit leaves the session where it was so the draft can be
//! corrected and committed again.

use crate::collection::Collection;
use crate::error::{EditError, EditResult};
use crate::gate::{GateStatus, Invariant};
use crate::session::{EditSession, SessionMode};
use devconsole_model::Entry;
use devconsole_validate::{
    FieldErrorMap, RuleContext, RuleSet, ValidateOptions, ValidationError, validate,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the working collection and its edit session.
pub struct CollectionEditor<E: Entry> {
    collection: Collection<E>,
    session: EditSession,
    rules: RuleSet,
    options: ValidateOptions,
    invariant: Option<Arc<dyn Invariant<E>>>,
    gate: GateStatus,
    field_errors: FieldErrorMap,
}

impl<E: Entry> CollectionEditor<E> {
    /// Creates an idle editor over `collection`; drafts are checked
    /// against `rules` on commit.
    pub fn new(collection: Collection<E>, rules: RuleSet) -> Self {
        Self {
            collection,
            session: EditSession::Idle,
            rules,
            options: ValidateOptions::default(),
            invariant: None,
            gate: GateStatus::open(),
            field_errors: FieldErrorMap::new(),
        }
    }

    /// Sets the invariant that gates saving and evaluates it immediately.
    #[must_use]
    pub fn with_invariant(mut self, invariant: Arc<dyn Invariant<E>>) -> Self {
        self.invariant = Some(invariant);
        self.reevaluate();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn collection(&self) -> &Collection<E> {
        &self.collection
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    pub fn draft(&self) -> Option<&Map<String, Value>> {
        self.session.draft()
    }

    /// Errors from the last failed commit, keyed by field name.
    pub fn field_errors(&self) -> &FieldErrorMap {
        &self.field_errors
    }

    /// Current save gate. Kept up to date after every collection change.
    pub fn gate(&self) -> &GateStatus {
        &self.gate
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Starts creating a new entry from `defaults`.
    pub fn start_create(&mut self, defaults: &E) -> EditResult<()> {
        self.require_idle()?;
        let draft = to_object(defaults)?;
        debug!("edit session: creating");
        self.field_errors.clear();
        self.session = EditSession::Creating { draft };
        Ok(())
    }

    /// Starts editing a detached copy of the entry with `key`.
    pub fn start_edit(&mut self, key: &str) -> EditResult<()> {
        self.require_idle()?;
        let entry = self
            .collection
            .get(key)
            .ok_or_else(|| EditError::UnknownKey(key.to_string()))?;
        let draft = to_object(entry)?;
        debug!(key, "edit session: editing");
        self.field_errors.clear();
        self.session = EditSession::Editing {
            original_key: key.to_string(),
            draft,
        };
        Ok(())
    }

    /// Merges `partial` into the draft field by field. The collection is
    /// untouched.
    pub fn update_draft(&mut self, partial: Map<String, Value>) -> EditResult<()> {
        let draft = self.session.draft_mut().ok_or(EditError::NoSession)?;
        draft.extend(partial);
        Ok(())
    }

    /// Sets a single draft field.
    pub fn set_field(&mut self, field: impl Into<String>, value: Value) -> EditResult<()> {
        let draft = self.session.draft_mut().ok_or(EditError::NoSession)?;
        draft.insert(field.into(), value);
        Ok(())
    }

    /// Discards the draft.
    pub fn cancel(&mut self) -> EditResult<()> {
        if self.session.is_idle() {
            return Err(EditError::NoSession);
        }
        debug!("edit session: cancelled");
        self.session = EditSession::Idle;
        self.field_errors.clear();
        Ok(())
    }

    /// Validates the draft and merges it into the collection.
    ///
    /// Any entry whose key equals the draft's key is replaced, so a create
    /// that reuses an existing key overwrites that entry. An edit replaces
    /// the entry it started from, even if the draft's key changed. On validation
    /// failure the session stays open and [`field_errors`](Self::field_errors)
    /// holds the per-field messages.
    pub async fn commit(&mut self) -> EditResult<()> {
        let draft = self.session.draft().ok_or(EditError::NoSession)?;
        let context = RuleContext {
            creating: self.session.mode() == SessionMode::Creating,
            existing_keys: self.collection.keys().map(str::to_string).collect(),
            original_key: self.session.original_key().map(str::to_string),
        };
        let candidate = Value::Object(draft.clone());

        let entry: E = match validate(&self.rules, &candidate, &context, &self.options).await {
            Ok(entry) => entry,
            Err(e) => {
                self.field_errors = match &e {
                    ValidationError::Failed(errors) => errors.clone(),
                    ValidationError::Malformed(_) => FieldErrorMap::new(),
                };
                return Err(e.into());
            }
        };

        debug!(key = entry.key(), "edit session: committed");
        if let Some(original) = self.session.original_key() {
            if original != entry.key() {
                debug!(from = original, to = entry.key(), "entry renamed");
            }
            self.collection.remove(original);
        }
        self.collection.remove(entry.key());
        self.collection.insert(entry);
        self.session = EditSession::Idle;
        self.field_errors.clear();
        self.reevaluate();
        Ok(())
    }

    /// Deletes the entry with `key` right away. Absent keys are a no-op.
    /// Not available while a create or edit is in progress.
    pub fn remove_by_key(&mut self, key: &str) -> EditResult<Option<E>> {
        self.require_idle()?;
        let removed = self.collection.remove(key);
        if removed.is_some() {
            debug!(key, "entry removed");
            self.reevaluate();
        }
        Ok(removed)
    }

    /// Replaces the working collection wholesale, e.g. after a load.
    /// Any open session is discarded.
    pub fn replace_collection(&mut self, collection: Collection<E>) {
        if !self.session.is_idle() {
            debug!("edit session discarded by collection replace");
        }
        self.collection = collection;
        self.session = EditSession::Idle;
        self.field_errors.clear();
        self.reevaluate();
    }

    // ── Internals ────────────────────────────────────────────────

    fn require_idle(&self) -> EditResult<()> {
        if self.session.is_idle() {
            Ok(())
        } else {
            Err(EditError::SessionActive)
        }
    }

    fn reevaluate(&mut self) {
        let next = match &self.invariant {
            Some(invariant) => GateStatus::evaluate(invariant.as_ref(), &self.collection),
            None => GateStatus::open(),
        };
        if next.saveable != self.gate.saveable {
            if let Some(warning) = &next.warning {
                warn!(%warning, "save blocked");
            } else {
                info!("save unblocked");
            }
        }
        self.gate = next;
    }
}

fn to_object<E: Entry>(entry: &E) -> EditResult<Map<String, Value>> {
    match serde_json::to_value(entry)? {
        Value::Object(map) => Ok(map),
        other => Err(EditError::Validation(ValidationError::Malformed(format!(
            "entry serialized to {other}, expected an object"
        )))),
    }
}
