//! A collection form: a remote resource plus its local working copy.

use crate::error::{FormError, FormResult, SaveBlocked};
use crate::hook::PostSaveHook;
use crate::resource::{RemoteResource, ResourceStatus, RestResource};
use devconsole_collection::{Collection, CollectionEditor, EditResult, GateStatus, Invariant};
use devconsole_model::{Entry, HasEntries};
use devconsole_validate::{FieldErrorMap, RuleSet, ValidateOptions};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Configuration for a collection form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Name used in log output.
    pub resource_name: String,
    /// Report only the first failing field when a commit is rejected.
    pub first_error_only: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            resource_name: "resource".to_string(),
            first_error_only: false,
        }
    }
}

/// Loads an object carrying a collection, lets the operator edit the
/// collection locally and saves the whole object back on request.
///
/// Every successful load replaces the working collection and discards any
/// open edit. Local changes never reach the remote store until [`save`],
/// which is refused while the invariant is violated, while a save is in
/// flight, or while a previous error is unacknowledged.
///
/// [`save`]: CollectionForm::save
pub struct CollectionForm<S, E: Entry, R> {
    config: FormConfig,
    resource: RestResource<S, R>,
    rules: RuleSet,
    invariant: Option<Arc<dyn Invariant<E>>>,
    hook: Option<Arc<dyn PostSaveHook<S>>>,
    editor: Option<CollectionEditor<E>>,
}

impl<S, E, R> CollectionForm<S, E, R>
where
    S: HasEntries<E> + Clone + Send + Sync,
    E: Entry,
    R: RemoteResource<S>,
{
    pub fn new(remote: R, rules: RuleSet, config: FormConfig) -> Self {
        let resource = RestResource::new(remote, config.resource_name.clone());
        Self {
            config,
            resource,
            rules,
            invariant: None,
            hook: None,
            editor: None,
        }
    }

    /// Sets the invariant gating [`save`](Self::save).
    #[must_use]
    pub fn with_invariant(mut self, invariant: Arc<dyn Invariant<E>>) -> Self {
        self.invariant = Some(invariant);
        self
    }

    #[must_use]
    pub fn with_post_save_hook(mut self, hook: Arc<dyn PostSaveHook<S>>) -> Self {
        self.hook = Some(hook);
        self
    }

    // ── Observation ──────────────────────────────────────────────

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn status(&self) -> ResourceStatus {
        self.resource.status()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceStatus> {
        self.resource.subscribe()
    }

    /// The last loaded or saved object.
    pub fn data(&self) -> Option<&S> {
        self.resource.data()
    }

    pub fn remote(&self) -> &R {
        self.resource.remote()
    }

    /// The working copy; `None` until the first successful load.
    pub fn editor(&self) -> Option<&CollectionEditor<E>> {
        self.editor.as_ref()
    }

    pub fn collection(&self) -> Option<&Collection<E>> {
        self.editor.as_ref().map(CollectionEditor::collection)
    }

    pub fn field_errors(&self) -> Option<&FieldErrorMap> {
        self.editor.as_ref().map(CollectionEditor::field_errors)
    }

    /// The invariant status of the working collection. Not saveable (and
    /// without a warning) before anything is loaded.
    pub fn gate(&self) -> GateStatus {
        match &self.editor {
            Some(editor) => editor.gate().clone(),
            None => GateStatus {
                saveable: false,
                warning: None,
            },
        }
    }

    /// Why saving is disabled right now, if it is.
    pub fn save_blocked(&self) -> Option<SaveBlocked> {
        let status = self.resource.status();
        if status.saving {
            return Some(SaveBlocked::InFlight);
        }
        if let Some(message) = status.error_message {
            return Some(SaveBlocked::Unacknowledged(message));
        }
        let gate = self.editor.as_ref()?.gate();
        if !gate.saveable {
            return Some(SaveBlocked::Invariant(gate.warning.clone().unwrap_or_default()));
        }
        None
    }

    pub fn can_save(&self) -> bool {
        self.editor.is_some() && self.save_blocked().is_none()
    }

    // ── Remote operations ────────────────────────────────────────

    /// Loads the object and makes its collection the working copy.
    /// On failure any existing working copy is kept and the error is
    /// published; calling `load` again retries.
    pub async fn load(&mut self) -> FormResult<()> {
        let loaded = self.resource.load().await?;
        let collection = Collection::from_entries(loaded.entries().iter().cloned());
        info!(
            resource = %self.config.resource_name,
            entries = collection.len(),
            "loaded"
        );

        match &mut self.editor {
            Some(editor) => editor.replace_collection(collection),
            None => {
                let options = ValidateOptions {
                    first: self.config.first_error_only,
                    ..Default::default()
                };
                let mut editor =
                    CollectionEditor::new(collection, self.rules.clone()).with_options(options);
                if let Some(invariant) = &self.invariant {
                    editor = editor.with_invariant(invariant.clone());
                }
                self.editor = Some(editor);
            }
        }
        Ok(())
    }

    /// Saves the working collection inside the last loaded object.
    ///
    /// On failure the working collection and any open edit are left exactly
    /// as they were. On success the post-save hook runs; its outcome does
    /// not affect the result.
    pub async fn save(&mut self) -> FormResult<()> {
        if let Some(reason) = self.save_blocked() {
            return Err(FormError::SaveBlocked(reason));
        }
        let editor = self.editor.as_ref().ok_or(FormError::NotLoaded)?;
        let mut payload = self.resource.data().cloned().ok_or(FormError::NotLoaded)?;
        payload.set_entries(editor.collection().to_vec());

        self.resource.save(payload).await?;
        info!(resource = %self.config.resource_name, "saved");

        if let (Some(hook), Some(saved)) = (&self.hook, self.resource.data()) {
            if let Err(e) = hook.after_save(saved).await {
                warn!(resource = %self.config.resource_name, error = %e, "post-save hook failed");
            }
        }
        Ok(())
    }

    /// Dismisses the last load or save error, re-enabling save.
    pub fn acknowledge_error(&mut self) {
        self.resource.acknowledge_error();
    }

    // ── Local edits ──────────────────────────────────────────────

    fn editor_mut(&mut self) -> FormResult<&mut CollectionEditor<E>> {
        self.editor.as_mut().ok_or(FormError::NotLoaded)
    }

    pub fn start_create(&mut self, defaults: &E) -> FormResult<()> {
        Ok(self.editor_mut()?.start_create(defaults)?)
    }

    pub fn start_edit(&mut self, key: &str) -> FormResult<()> {
        Ok(self.editor_mut()?.start_edit(key)?)
    }

    pub fn update_draft(&mut self, partial: Map<String, Value>) -> FormResult<()> {
        Ok(self.editor_mut()?.update_draft(partial)?)
    }

    pub fn set_field(&mut self, field: &str, value: Value) -> FormResult<()> {
        Ok(self.editor_mut()?.set_field(field, value)?)
    }

    pub fn cancel(&mut self) -> FormResult<()> {
        Ok(self.editor_mut()?.cancel()?)
    }

    pub async fn commit(&mut self) -> FormResult<()> {
        let result: EditResult<()> = self.editor_mut()?.commit().await;
        Ok(result?)
    }

    pub fn remove_by_key(&mut self, key: &str) -> FormResult<Option<E>> {
        Ok(self.editor_mut()?.remove_by_key(key)?)
    }
}
