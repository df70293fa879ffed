use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Result, StorageKey};

/// Keyed document storage.
///
/// Each key holds one JSON document. Writes replace the whole document
/// ("last write wins"); there is no cross-key transaction.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Reads the raw document stored under `key`.
    ///
    /// Returns None if nothing has been written yet.
    async fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replaces the document stored under `key`.
    async fn write(&self, key: StorageKey, document: String) -> Result<()>;
}

/// Extension trait providing typed access to documents.
#[async_trait]
pub trait DocumentStorageExt: DocumentStorage {
    /// Reads and decodes the document under `key`.
    async fn load<T>(&self, key: StorageKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.read(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes `value` and writes it under `key`.
    async fn save<T>(&self, key: StorageKey, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let document = serde_json::to_string(value)?;
        self.write(key, document).await
    }
}

// Blanket implementation for all DocumentStorage implementations
impl<T: DocumentStorage + ?Sized> DocumentStorageExt for T {}
