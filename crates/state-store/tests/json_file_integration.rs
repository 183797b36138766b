//! Integration tests for the JSON file state store.

use std::path::PathBuf;

use state_store::{JsonFileStore, LotSnapshot, StateStore, StateStoreError};

fn temp_state_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("parking-state-{}", uuid::Uuid::new_v4()))
        .join("state.json")
}

#[tokio::test]
async fn save_then_load_roundtrip() {
    let path = temp_state_path();
    let store = JsonFileStore::new(&path);

    let snapshot = LotSnapshot::new(
        1,
        100,
        vec![serde_json::json!({
            "plate": "ABC123",
            "category": "light",
            "check_in": "2025-11-04T15:58:22Z",
            "check_out": null
        })],
    );

    store.save(&snapshot).await.unwrap();
    assert!(store.exists().await.unwrap());

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, snapshot);
    assert!(loaded.vehicles[0]["check_out"].is_null());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn load_missing_file_returns_none() {
    let store = JsonFileStore::new(temp_state_path());
    assert!(store.load().await.unwrap().is_none());
    assert!(!store.exists().await.unwrap());
}

#[tokio::test]
async fn clear_removes_the_file() {
    let path = temp_state_path();
    let store = JsonFileStore::new(&path);

    store.save(&LotSnapshot::new(0, 10, vec![])).await.unwrap();
    assert!(store.clear().await.unwrap());
    assert!(!store.exists().await.unwrap());
    assert!(!store.clear().await.unwrap());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let path = temp_state_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StateStoreError::Serialization(_)));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn second_save_overwrites_first() {
    let path = temp_state_path();
    let store = JsonFileStore::new(&path);

    store.save(&LotSnapshot::new(1, 10, vec![])).await.unwrap();
    store.save(&LotSnapshot::new(4, 10, vec![])).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.occupied, 4);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
