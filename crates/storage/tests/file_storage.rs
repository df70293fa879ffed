//! Integration tests for the file-backed storage.

use serde::{Deserialize, Serialize};
use storage::{DocumentStorage, DocumentStorageExt, FileStorage, StorageKey};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Pool {
    tshirts: u32,
}

#[tokio::test]
async fn documents_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let storage = FileStorage::open(dir.path()).await.unwrap();
    storage
        .save(StorageKey::Inventory, &Pool { tshirts: 7 })
        .await
        .unwrap();
    drop(storage);

    let reopened = FileStorage::open(dir.path()).await.unwrap();
    let pool: Option<Pool> = reopened.load(StorageKey::Inventory).await.unwrap();
    assert_eq!(pool, Some(Pool { tshirts: 7 }));
}

#[tokio::test]
async fn keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).await.unwrap();

    storage
        .write(StorageKey::Riders, "[\"r\"]".to_string())
        .await
        .unwrap();
    storage
        .write(StorageKey::Supervisors, "[\"s\"]".to_string())
        .await
        .unwrap();

    assert_eq!(
        storage.read(StorageKey::Riders).await.unwrap().as_deref(),
        Some("[\"r\"]")
    );
    assert_eq!(
        storage.read(StorageKey::Supervisors).await.unwrap().as_deref(),
        Some("[\"s\"]")
    );
    assert!(storage.read(StorageKey::Orders).await.unwrap().is_none());
}

#[tokio::test]
async fn write_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).await.unwrap();
    storage
        .write(StorageKey::Orders, "[]".to_string())
        .await
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["ems_orders_v1.json".to_string()]);
}
