use boxdraft_admin::*;
use boxdraft_domain::config::AppConfig;
use boxdraft_domain::{Player, QuestionType};
use boxdraft_registry::{Registry, Selection};
use boxdraft_storage::MemoryStore;

async fn login() -> (Registry<MemoryStore>, AdminSession<MemoryStore>) {
    let registry = Registry::open(MemoryStore::new(), "box_draft_app_v1").await;
    let gate = AdminGate::from_config(registry.clone(), &AppConfig::default());
    let session = gate.login("zxczxc").unwrap();
    (registry, session)
}

fn player(id: &str) -> Player {
    Player { id: id.to_owned(), name: id.to_uppercase(), ..Player::default() }
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let registry = Registry::open(MemoryStore::new(), "k").await;
    let gate = AdminGate::new(registry, "s3cret", BannerEncoder::default());

    assert!(matches!(gate.login("zxczxc"), Err(AdminError::InvalidPassword { .. })));
    assert_eq!(gate.login("").unwrap_err().to_string(), "Incorrect password");
    assert!(gate.login("s3cret").is_ok());
}

#[tokio::test]
async fn new_questions_append_and_edits_keep_identity() {
    let (registry, session) = login().await;

    let added = session
        .save_question(QuestionDraft::new("  Discord handle ").kind(QuestionType::Text).required(false))
        .await
        .unwrap();
    assert!(added.id.starts_with("q_"));
    assert_eq!(added.label, "Discord handle");
    assert_eq!(added.order, 3);
    assert_eq!(added.description, None);

    let mut draft = QuestionDraft::edit(&added);
    draft.label = "Discord".into();
    draft.description = "Where we reach you".into();
    draft.kind = QuestionType::Textarea;
    let edited = session.save_question(draft).await.unwrap();
    assert_eq!((edited.id.as_str(), edited.order), (added.id.as_str(), 3));

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.questions.len(), 4);
    let stored = snapshot.question(&added.id).unwrap();
    assert_eq!(stored.label, "Discord");
    assert_eq!(stored.description.as_deref(), Some("Where we reach you"));
    assert_eq!(stored.kind, QuestionType::Textarea);
}

#[tokio::test]
async fn invalid_forms_change_nothing() {
    let (registry, session) = login().await;
    let before = registry.snapshot();

    assert!(matches!(
        session.save_question(QuestionDraft::new("   ")).await,
        Err(AdminError::Validation { .. })
    ));
    let ghost = QuestionDraft { editing: Some("q_gone".into()), ..QuestionDraft::new("Ghost") };
    assert!(matches!(session.save_question(ghost).await, Err(AdminError::UnknownQuestion { .. })));

    let blank = BoxDraft { id: "box-1".into(), name: " ".into(), capacity: 3 };
    assert!(matches!(session.save_box(blank).await, Err(AdminError::Validation { .. })));
    let empty = BoxDraft { id: "box-1".into(), name: "Red".into(), capacity: 0 };
    assert!(matches!(session.save_box(empty).await, Err(AdminError::Validation { .. })));
    let unknown = BoxDraft { id: "box-9".into(), name: "Red".into(), capacity: 2 };
    assert!(matches!(session.save_box(unknown).await, Err(AdminError::UnknownBox { .. })));

    assert_eq!(*registry.snapshot(), *before);
}

#[tokio::test]
async fn drag_and_drop_bypasses_capacity() {
    let (registry, session) = login().await;
    let mut draft = BoxDraft::edit(registry.snapshot().box_by_id("box-1").unwrap());
    draft.capacity = 1;
    draft.name = "Solo".into();
    session.save_box(draft).await.unwrap();

    registry.register_player(player("p1")).await;
    registry.register_player(player("p2")).await;
    assert!(registry.select_box("p1", "box-1").await.is_joined());
    assert!(matches!(registry.select_box("p2", "box-1").await, Selection::Rejected(_)));

    session.drop_player("p2", DropTarget::Box("box-1".into())).await.unwrap();
    let dashboard = session.dashboard();
    let column = dashboard.columns.iter().find(|c| c.id == "box-1").unwrap();
    assert_eq!(column.badge(), "2 / 1");
    assert!(column.is_full);
    assert!(dashboard.unassigned.is_empty());

    session.drop_player("p1", DropTarget::Unassigned).await.unwrap();
    let dashboard = session.dashboard();
    assert_eq!(dashboard.unassigned, vec![PlayerCard { id: "p1".into(), name: "P1".into() }]);
    assert_eq!(dashboard.roster[0].placement, Placement::Pending);
    assert_eq!(dashboard.roster[1].placement, Placement::Box("Solo".into()));

    assert!(matches!(
        session.drop_player("p1", DropTarget::Box("box-77".into())).await,
        Err(AdminError::UnknownBox { .. })
    ));
    assert!(matches!(
        session.drop_player("ghost", DropTarget::Unassigned).await,
        Err(AdminError::UnknownPlayer { .. })
    ));
}

#[tokio::test]
async fn settings_and_reset() {
    let (registry, session) = login().await;
    registry.register_player(player("p1")).await;

    let mut draft = SettingsDraft::edit(&registry.snapshot().settings);
    draft.title = "Winter Cup".into();
    draft.banner_url = "https://example.com/banner.png".into();
    draft.banner_position = 250;
    draft.show_teammates = false;
    session.save_settings(draft).await;

    let settings = registry.snapshot().settings.clone();
    assert_eq!(settings.event_title, "Winter Cup");
    assert_eq!(settings.banner(), Some("https://example.com/banner.png"));
    assert_eq!(settings.banner_position(), 100);
    assert!(!settings.teammates_visible());

    session.delete_player("p1").await.unwrap();
    assert!(matches!(session.delete_player("p1").await, Err(AdminError::UnknownPlayer { .. })));

    registry.register_player(player("p2")).await;
    let pending = session.reset_players();
    assert_eq!(pending.players(), 1);
    assert_eq!(pending.confirm().await, 1);
    assert!(registry.snapshot().players.is_empty());
    assert_eq!(registry.snapshot().settings, settings);
}
