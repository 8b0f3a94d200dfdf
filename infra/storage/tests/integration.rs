use boxdraft_storage::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(storage.path_of("../etc/passwd").is_err());
    assert!(storage.path_of("foo/bar").is_err());
    assert!(matches!(storage.set("..", "x").await, Err(StorageError::InvalidKey { .. })));
}

#[tokio::test]
async fn test_set_get_roundtrip_uncompressed() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.set("box_draft_app_v1", r#"{"players":[]}"#).await.unwrap();
    assert!(storage.path_of("box_draft_app_v1").unwrap().is_file());

    let on_disk = std::fs::read_to_string(temp.path().join("box_draft_app_v1.json")).unwrap();
    assert_eq!(on_disk, r#"{"players":[]}"#);
    assert_eq!(storage.get("box_draft_app_v1").await.unwrap().as_deref(), Some(r#"{"players":[]}"#));
}

#[tokio::test]
async fn test_set_get_roundtrip_compressed() {
    let temp = TempDir::new().unwrap();
    let storage =
        Storage::builder().root(temp.path()).compression(Compression::Lz4).connect().await.unwrap();

    let payload = "a".repeat(4096);
    storage.set("snapshot", &payload).await.unwrap();

    let raw = std::fs::read(temp.path().join("snapshot.json")).unwrap();
    assert!(raw.len() < payload.len());
    assert_eq!(storage.get("snapshot").await.unwrap(), Some(payload));
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert_eq!(storage.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_quota_rejects_and_keeps_previous_value() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).quota(32).connect().await.unwrap();

    storage.set("k", "first").await.unwrap();
    // Overwriting does not count the old value against the budget.
    storage.set("k", &"b".repeat(32)).await.unwrap();

    let err = storage.set("k", &"c".repeat(33)).await.unwrap_err();
    match err {
        StorageError::QuotaExceeded { needed, quota, .. } => {
            assert_eq!(quota, 32);
            assert_eq!(needed, 33);
        },
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(storage.get("k").await.unwrap(), Some("b".repeat(32)));
    assert_eq!(storage.used_bytes().await, 32);
}

#[tokio::test]
async fn test_leftover_temp_name_does_not_block_writes() {
    let temp = TempDir::new().unwrap();
    // A run killed between staging and rename leaves its first temp name behind.
    std::fs::write(temp.path().join("box_draft_app_v1.json.draftmp.0"), "partial").unwrap();
    std::fs::write(temp.path().join("box_draft_app_v1.json.draftmp.1"), "partial").unwrap();

    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    storage.set("box_draft_app_v1", r#"{"players":[]}"#).await.unwrap();

    assert_eq!(storage.get("box_draft_app_v1").await.unwrap().as_deref(), Some(r#"{"players":[]}"#));
    let leftover = std::fs::read_to_string(temp.path().join("box_draft_app_v1.json.draftmp.0")).unwrap();
    assert_eq!(leftover, "partial");
}

#[tokio::test]
async fn test_connect_without_create_requires_root() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let err = Storage::builder().root(&missing).create(false).connect().await.unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[tokio::test]
async fn test_stale_temp_files_are_not_counted() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("k.json.draftmp.7"), "leftover").unwrap();

    let storage = Storage::builder().root(temp.path()).quota(4).connect().await.unwrap();
    storage.set("k", "four").await.unwrap();
    assert_eq!(storage.used_bytes().await, 4);
}

#[tokio::test]
async fn test_shared_store_through_arc() {
    let store = std::sync::Arc::new(MemoryStore::new());
    store.set("k", "v").await.unwrap();

    let clone = MemoryStore::clone(&store);
    assert_eq!(clone.get("k").await.unwrap().as_deref(), Some("v"));
}
