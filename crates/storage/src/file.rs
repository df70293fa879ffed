use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{DocumentStorage, Result, StorageError, StorageKey};

/// File-backed document storage.
///
/// Each key is stored as `<root>/<key>.json`. Writes go to a temporary file
/// that is then renamed over the target, so a reader never sees a torn
/// document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(StorageError::Root)?;
        tracing::debug!(root = %root.display(), "opened file storage");
        Ok(Self { root })
    }

    /// Returns the storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the file holding `key`.
    pub fn path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl DocumentStorage for FileStorage {
    async fn read(&self, key: StorageKey) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    async fn write(&self, key: StorageKey, document: String) -> Result<()> {
        let target = self.path_for(key);
        let staging = target.with_extension("json.tmp");
        tokio::fs::write(&staging, document)
            .await
            .map_err(|source| StorageError::Io { key, source })?;
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(|source| StorageError::Io { key, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn path_uses_key_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();
        assert_eq!(
            storage.path_for(StorageKey::Inventory),
            dir.path().join("ems_inventory_v1.json")
        );
    }

    #[tokio::test]
    async fn open_creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let storage = FileStorage::open(&root).await.unwrap();
        assert!(storage.root().is_dir());
    }

    #[tokio::test]
    async fn read_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();
        assert!(storage.read(StorageKey::Orders).await.unwrap().is_none());
    }
}
