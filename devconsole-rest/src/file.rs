//! A remote resource backed by a JSON file.

use crate::error::{TransportError, TransportResult};
use crate::resource::RemoteResource;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores one JSON document at `path`.
///
/// Saves write a sibling temporary file and rename it into place, so a
/// reader never sees a half-written document.
pub struct JsonFileResource<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileResource<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl<T> RemoteResource<T> for JsonFileResource<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> TransportResult<T> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TransportError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %self.path.display(), len = bytes.len(), "read document");
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, value: &T) -> TransportResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        debug!(path = %self.path.display(), len = bytes.len(), "wrote document");
        Ok(())
    }
}
