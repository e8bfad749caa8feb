//! File store persistence tests.

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use record_store::{keys, Collection, FileStore, RecordStore};

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");

    {
        let store = FileStore::open(&path).await.unwrap();
        store.set(keys::ORDERS, json!([{"id": "1"}])).await.unwrap();
        store.set(keys::SESSION, json!({"id": "u1"})).await.unwrap();
        store.remove(keys::SESSION).await.unwrap();
    }

    let reopened = FileStore::open(&path).await.unwrap();
    assert_eq!(
        reopened.get(keys::ORDERS).await.unwrap(),
        Some(json!([{"id": "1"}]))
    );
    assert_eq!(reopened.get(keys::SESSION).await.unwrap(), None);
}

#[tokio::test]
async fn test_missing_file_opens_empty_and_creates_parent_on_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("data.json");

    let store = FileStore::open(&path).await.unwrap();
    assert_eq!(store.get(keys::USERS).await.unwrap(), None);

    store.set(keys::USERS, json!([])).await.unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("nested").join("data.json.tmp").exists());
}

#[tokio::test]
async fn test_non_object_document_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(FileStore::open(&path).await.is_err());
}

#[tokio::test]
async fn test_collection_over_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");

    let store: Arc<dyn RecordStore> = Arc::new(FileStore::open(&path).await.unwrap());
    let names: Collection<String> = Collection::new(store, "names");
    names.push("first".to_string()).await.unwrap();
    names.push("second".to_string()).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["names"], json!(["first", "second"]));
}
