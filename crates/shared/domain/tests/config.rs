use boxdraft_domain::config::{
    AdminConfig, AppConfig, BannerConfig, SnapshotCompression, StorageConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let storage = StorageConfig::default();
    assert_eq!(storage.key, "box_draft_app_v1");
    assert_eq!(storage.compression, SnapshotCompression::None);
    assert_eq!(storage.quota_bytes, Some(5 * 1024 * 1024));

    assert_eq!(AdminConfig::default().password, "zxczxc");
    assert_eq!(BannerConfig::default().max_bytes, 2_621_440);
}

#[test]
fn app_config_deserializes_partial_sections() {
    let raw = json!({
        "storage": { "data_dir": "/tmp/draft", "compression": "lz4", "quota_bytes": null },
        "admin": { "password": "hunter2" }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/tmp/draft"));
    assert_eq!(cfg.storage.compression, SnapshotCompression::Lz4);
    assert_eq!(cfg.storage.key, "box_draft_app_v1");
    assert!(cfg.storage.quota_bytes.is_none());
    assert_eq!(cfg.admin.password, "hunter2");
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn deref_mut_copies_on_write() {
    let original = AppConfig::default();
    let mut edited = original.clone();
    edited.admin.password = "changed".to_owned();

    assert_eq!(original.admin.password, "zxczxc");
    assert_eq!(edited.admin.password, "changed");
}
