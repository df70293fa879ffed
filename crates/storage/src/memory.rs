use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{DocumentStorage, Result, StorageKey};

/// In-memory document storage.
///
/// Used by tests and when no data directory is configured. Clones share the
/// same documents.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    documents: Arc<RwLock<HashMap<StorageKey, String>>>,
}

impl InMemoryStorage {
    /// Creates a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl DocumentStorage for InMemoryStorage {
    async fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.documents.read().await.get(&key).cloned())
    }

    async fn write(&self, key: StorageKey, document: String) -> Result<()> {
        self.documents.write().await.insert(key, document);
        Ok(())
    }
}
