//! The remote resource contract and its observable status.

use crate::error::TransportResult;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Loads a configuration object from the device and persists it back.
///
/// Timeouts and retries are the implementation's business; callers see a
/// single result per call.
#[async_trait]
pub trait RemoteResource<T: Send + Sync>: Send + Sync {
    async fn load(&self) -> TransportResult<T>;

    async fn save(&self, value: &T) -> TransportResult<()>;
}

/// What the presentation layer shows about a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStatus {
    pub loading: bool,
    pub saving: bool,
    /// Message of the last failed load or save, until acknowledged.
    pub error_message: Option<String>,
}

/// A remote resource together with its last loaded value and status.
///
/// Status changes are published on a watch channel so views can follow a
/// load or save while it is in flight.
pub struct RestResource<T, R> {
    remote: R,
    data: Option<T>,
    status: watch::Sender<ResourceStatus>,
    name: String,
}

impl<T, R> RestResource<T, R>
where
    T: Send + Sync,
    R: RemoteResource<T>,
{
    pub fn new(remote: R, name: impl Into<String>) -> Self {
        let (status, _) = watch::channel(ResourceStatus::default());
        Self {
            remote,
            data: None,
            status,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// The last successfully loaded or saved value.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn status(&self) -> ResourceStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceStatus> {
        self.status.subscribe()
    }

    /// Loads the value, replacing whatever was held before.
    pub async fn load(&mut self) -> TransportResult<&T> {
        self.status.send_modify(|s| {
            s.loading = true;
            s.error_message = None;
        });
        debug!(resource = %self.name, "loading");

        let result = self.remote.load().await;
        let error_message = result.as_ref().err().map(ToString::to_string);
        if let Some(message) = &error_message {
            warn!(resource = %self.name, error = %message, "load failed");
        }
        self.status.send_modify(|s| {
            s.loading = false;
            s.error_message = error_message;
        });

        let value = result?;
        Ok(self.data.insert(value))
    }

    /// Saves `value`. On success it becomes the held value; on failure the
    /// held value is unchanged and the error is published.
    pub async fn save(&mut self, value: T) -> TransportResult<()> {
        self.status.send_modify(|s| {
            s.saving = true;
            s.error_message = None;
        });
        debug!(resource = %self.name, "saving");

        let result = self.remote.save(&value).await;
        let error_message = result.as_ref().err().map(ToString::to_string);
        if let Some(message) = &error_message {
            warn!(resource = %self.name, error = %message, "save failed");
        }
        self.status.send_modify(|s| {
            s.saving = false;
            s.error_message = error_message;
        });

        result?;
        self.data = Some(value);
        Ok(())
    }

    /// Clears the published error.
    pub fn acknowledge_error(&mut self) {
        self.status.send_modify(|s| s.error_message = None);
    }
}
