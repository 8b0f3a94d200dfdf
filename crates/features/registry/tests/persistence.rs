use boxdraft_domain::{AppState, Player};
use boxdraft_registry::{Registry, Selection};
use boxdraft_storage::{KeyValueStore, MemoryStore, Storage};
use tempfile::TempDir;

const KEY: &str = "box_draft_app_v1";

fn player(id: &str) -> Player {
    Player { id: id.to_owned(), name: id.to_uppercase(), ..Player::default() }
}

#[tokio::test]
async fn every_mutation_writes_the_full_snapshot() {
    let store = MemoryStore::new();
    let registry = Registry::open(store.clone(), KEY).await;
    assert!(store.raw(KEY).is_none(), "opening must not write");

    registry.register_player(player("p1")).await;
    registry.select_box("p1", "box-4").await;

    let stored: AppState = serde_json::from_str(&store.raw(KEY).unwrap()).unwrap();
    assert_eq!(stored, *registry.snapshot());
    assert!(store.raw(KEY).unwrap().contains("\"selectedBoxId\":\"box-4\""));
}

#[tokio::test]
async fn no_op_does_not_write() {
    let store = MemoryStore::new();
    let registry = Registry::open(store.clone(), KEY).await;

    assert!(!registry.delete_player("ghost").await);
    assert!(!registry.select_box("ghost", "box-1").await.is_joined());
    assert!(store.raw(KEY).is_none());
}

#[tokio::test]
async fn malformed_snapshot_falls_back_to_defaults() {
    let store = MemoryStore::new();
    store.insert_raw(KEY, "{\"questions\": [oops");

    let registry = Registry::open(store, KEY).await;
    assert_eq!(*registry.snapshot(), AppState::default());
}

#[tokio::test]
async fn quota_failure_keeps_memory_authoritative() {
    let store = MemoryStore::with_quota(4096);
    let registry = Registry::open(store.clone(), KEY).await;
    registry.register_player(player("p1")).await;
    let persisted = store.raw(KEY).unwrap();

    let mut big = player("p2");
    big.answers.insert("q1".into(), "x".repeat(8192));
    registry.register_player(big).await;

    assert_eq!(registry.snapshot().players.len(), 2);
    assert_eq!(store.raw(KEY).unwrap(), persisted, "failed write must not replace the old value");

    // Later successful operations still work on the in-memory state.
    assert_eq!(registry.select_box("p1", "box-1").await, Selection::Joined { previous: None });
}

#[tokio::test]
async fn write_failures_are_swallowed() {
    let store = MemoryStore::new();
    let registry = Registry::open(store.clone(), KEY).await;
    store.fail_writes(true);

    registry.register_player(player("p1")).await;
    assert!(registry.move_player("p1", Some("box-2")).await);
    assert_eq!(registry.snapshot().occupancy("box-2"), 1);
    assert!(store.get(KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn reopened_registry_sees_last_snapshot_on_disk() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    {
        let registry = Registry::open(storage.clone(), KEY).await;
        registry.register_player(player("p1")).await;
        registry.select_box("p1", "box-2").await;
    }

    let reopened = Registry::open(storage, KEY).await;
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.players.len(), 1);
    assert!(snapshot.player("p1").unwrap().is_in("box-2"));
    assert!(temp.path().join("box_draft_app_v1.json").exists());
}
