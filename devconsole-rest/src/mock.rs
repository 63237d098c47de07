//! An in-memory remote resource for testing.

use crate::error::{TransportError, TransportResult};
use crate::resource::RemoteResource;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
struct MemoryState<T> {
    stored: Option<T>,
    load_failure: Option<String>,
    save_failure: Option<String>,
    loads: usize,
    saves: usize,
}

/// Holds the "device" copy of a value in memory.
///
/// Clones share the same storage, so a test can keep a handle while the
/// form owns another.
#[derive(Debug)]
pub struct MemoryResource<T> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T> Clone for MemoryResource<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Clone> MemoryResource<T> {
    /// Creates a resource already holding `value`.
    pub fn new(value: T) -> Self {
        Self::with_stored(Some(value))
    }

    /// Creates a resource with nothing stored; loads fail with `NotFound`.
    pub fn empty() -> Self {
        Self::with_stored(None)
    }

    fn with_stored(stored: Option<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                stored,
                load_failure: None,
                save_failure: None,
                loads: 0,
                saves: 0,
            })),
        }
    }

    /// Makes every load fail with a network error until cleared with `None`.
    pub async fn fail_loads(&self, message: Option<&str>) {
        self.state.lock().await.load_failure = message.map(str::to_string);
    }

    /// Makes every save fail with a network error until cleared with `None`.
    pub async fn fail_saves(&self, message: Option<&str>) {
        self.state.lock().await.save_failure = message.map(str::to_string);
    }

    /// The value currently stored.
    pub async fn stored(&self) -> Option<T> {
        self.state.lock().await.stored.clone()
    }

    /// Replaces the stored value, as if changed on the device.
    pub async fn put(&self, value: T) {
        self.state.lock().await.stored = Some(value);
    }

    /// Number of load attempts, including failed ones.
    pub async fn load_count(&self) -> usize {
        self.state.lock().await.loads
    }

    /// Number of save attempts, including failed ones.
    pub async fn save_count(&self) -> usize {
        self.state.lock().await.saves
    }
}

#[async_trait]
impl<T> RemoteResource<T> for MemoryResource<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> TransportResult<T> {
        let mut state = self.state.lock().await;
        state.loads += 1;
        if let Some(message) = &state.load_failure {
            return Err(TransportError::Network(message.clone()));
        }
        state
            .stored
            .clone()
            .ok_or_else(|| TransportError::NotFound("memory".to_string()))
    }

    async fn save(&self, value: &T) -> TransportResult<()> {
        let mut state = self.state.lock().await;
        state.saves += 1;
        if let Some(message) = &state.save_failure {
            return Err(TransportError::Network(message.clone()));
        }
        state.stored = Some(value.clone());
        Ok(())
    }
}
