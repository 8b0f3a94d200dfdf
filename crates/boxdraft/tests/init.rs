use boxdraft::domain::config::{AppConfig, SnapshotCompression};
use boxdraft::init;
use tempfile::TempDir;

#[tokio::test]
async fn init_wires_storage_registry_and_admin() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.storage.data_dir = temp.path().join("data");
    config.storage.compression = SnapshotCompression::Lz4;

    let app = init(&config).await.unwrap();
    let mut flow = app.registration();
    flow.answer("q1", "Ada Lovelace");
    flow.answer("q2", "ada@example.com");
    let player = flow.submit().await.unwrap();

    let session = app.admin.login("zxczxc").unwrap();
    assert_eq!(session.dashboard().unassigned.len(), 1);
    assert!(temp.path().join("data").join("box_draft_app_v1.json").exists());

    let reopened = init(&config).await.unwrap();
    assert_eq!(reopened.registry.snapshot().player(&player.id).unwrap().name, "Ada Lovelace");
}
