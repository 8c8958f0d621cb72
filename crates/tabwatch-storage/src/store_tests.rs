use super::*;
use crate::keys;
use serde_json::json;

#[tokio::test]
async fn test_memory_store_roundtrip() {
    let store = MemoryStateStore::new();
    assert!(store.get(keys::EXTENSION_ACTIVE).await.unwrap().is_none());

    store.set(keys::EXTENSION_ACTIVE, json!(true)).await.unwrap();
    assert_eq!(store.get(keys::EXTENSION_ACTIVE).await.unwrap(), Some(json!(true)));

    store.remove(keys::EXTENSION_ACTIVE).await.unwrap();
    assert!(store.get(keys::EXTENSION_ACTIVE).await.unwrap().is_none());
}

#[tokio::test]
async fn test_remove_absent_key_is_noop() {
    let store = MemoryStateStore::new();
    store.remove("nonexistent").await.unwrap();
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let store = FileStateStore::open(&path).await.unwrap();
        store.set(keys::LISTENING_WINDOW_ID, json!(42)).await.unwrap();
        store
            .set(keys::ANALYZED_URLS_CACHE, json!({"https://a.com": "text"}))
            .await
            .unwrap();
    }

    let store = FileStateStore::open(&path).await.unwrap();
    assert_eq!(store.get(keys::LISTENING_WINDOW_ID).await.unwrap(), Some(json!(42)));
    assert_eq!(
        store.get(keys::ANALYZED_URLS_CACHE).await.unwrap(),
        Some(json!({"https://a.com": "text"}))
    );
}

#[tokio::test]
async fn test_file_store_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = FileStateStore::open(&path).await.unwrap();
    store.set(keys::LISTENING_WINDOW_ID, json!(7)).await.unwrap();
    store.remove(keys::LISTENING_WINDOW_ID).await.unwrap();
    drop(store);

    let store = FileStateStore::open(&path).await.unwrap();
    assert!(store.get(keys::LISTENING_WINDOW_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_tolerates_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let store = FileStateStore::open(&path).await.unwrap();
    assert!(store.get(keys::LISTENING_WINDOW_ID).await.unwrap().is_none());
}
