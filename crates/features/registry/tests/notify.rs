use boxdraft_domain::Player;
use boxdraft_registry::{ChangeReceiverExt, Registry, RegistryEvent};
use boxdraft_storage::MemoryStore;
use std::time::Duration;

fn player(id: &str) -> Player {
    Player { id: id.to_owned(), name: id.to_owned(), ..Player::default() }
}

#[tokio::test]
async fn events_describe_applied_mutations_only() {
    let registry = Registry::open(MemoryStore::new(), "k").await;
    let mut events = registry.events();

    registry.register_player(player("p1")).await;
    registry.select_box("p1", "box-1").await;
    registry.select_box("p1", "box-1").await;
    registry.move_player("p1", None).await;

    assert_eq!(
        events.next_change().await,
        Some(RegistryEvent::PlayerRegistered { player_id: "p1".into() })
    );
    assert_eq!(
        events.next_change().await,
        Some(RegistryEvent::BoxSelected {
            player_id: "p1".into(),
            box_id: "box-1".into(),
            previous: None,
        })
    );
    assert_eq!(
        events.next_change().await,
        Some(RegistryEvent::PlayerMoved {
            player_id: "p1".into(),
            box_id: None,
            previous: Some("box-1".into()),
        })
    );
    assert!(events.try_recv().is_err(), "idempotent join must not be announced");
}

#[tokio::test]
async fn lagging_receiver_skips_ahead() {
    let registry = Registry::open(MemoryStore::new(), "k").await;
    let mut events = registry.events();

    for i in 0..300 {
        registry.register_player(player(&format!("p{i}"))).await;
    }

    let first = events.next_change().await.unwrap();
    assert!(matches!(first, RegistryEvent::PlayerRegistered { ref player_id } if player_id != "p0"));
}

#[tokio::test]
async fn watchers_receive_latest_snapshot() {
    let registry = Registry::open(MemoryStore::new(), "k").await;
    let mut snapshots = registry.subscribe();

    let writer = registry.clone();
    let task = tokio::spawn(async move {
        writer.register_player(player("p1")).await;
    });

    let snapshot = tokio::time::timeout(Duration::from_secs(1), snapshots.next_change())
        .await
        .unwrap()
        .unwrap();
    task.await.unwrap();
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(registry.snapshot().players.len(), 1);
}
