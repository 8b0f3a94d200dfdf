use crate::constants::{DEFAULT_BANNER_MAX_BYTES, STORAGE_KEY};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub banner: BannerConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// On-disk compression of the persisted snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotCompression {
    #[default]
    None,
    Lz4,
}

/// Where and how the snapshot is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub key: String,
    pub compression: SnapshotCompression,
    /// Byte budget shared by everything under `data_dir`, `None` for unlimited.
    pub quota_bytes: Option<u64>,
}

/// The static shared password guarding the admin dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            key: STORAGE_KEY.to_owned(),
            compression: SnapshotCompression::None,
            quota_bytes: Some(5 * 1024 * 1024),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { password: "zxczxc".to_owned() }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_BANNER_MAX_BYTES }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
