use crate::engine::{Compression, Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use sealed::Stage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

/// Builder stage before a root directory is chosen.
#[derive(Debug, Default)]
pub struct Unrooted;

/// Builder stage holding the root directory.
#[derive(Debug)]
pub struct Rooted(PathBuf);

mod sealed {
    pub trait Stage {}
}
impl Stage for Unrooted {}
impl Stage for Rooted {}

/// Configures a [`Storage`]. Only a builder with a root can [`connect`](StorageBuilder::connect).
#[derive(Debug)]
pub struct StorageBuilder<S: Stage = Unrooted> {
    stage: S,
    compression: Compression,
    create_root: bool,
    quota: Option<u64>,
}

impl Default for StorageBuilder<Unrooted> {
    fn default() -> Self {
        Self { stage: Unrooted, compression: Compression::None, create_root: true, quota: None }
    }
}

impl<S: Stage> StorageBuilder<S> {
    #[must_use]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Whether [`connect`](StorageBuilder::connect) may create a missing root. On by default.
    #[must_use]
    pub const fn create(mut self, create_root: bool) -> Self {
        self.create_root = create_root;
        self
    }

    /// Caps the on-disk size of all values together. A write over the cap fails with
    /// [`StorageError::QuotaExceeded`] and keeps the previous value.
    #[must_use]
    pub const fn quota(self, bytes: u64) -> Self {
        self.maybe_quota(Some(bytes))
    }

    /// Like [`quota`](StorageBuilder::quota); `None` removes the cap.
    #[must_use]
    pub const fn maybe_quota(mut self, bytes: Option<u64>) -> Self {
        self.quota = bytes;
        self
    }
}

impl StorageBuilder<Unrooted> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<Rooted> {
        StorageBuilder {
            stage: Rooted(path.into()),
            compression: self.compression,
            create_root: self.create_root,
            quota: self.quota,
        }
    }
}

impl StorageBuilder<Rooted> {
    /// Opens the store: creates the root if allowed, resolves it to a canonical path, then
    /// sweeps stale temp files left by interrupted writes.
    ///
    /// # Errors
    /// [`StorageError::Io`] if the root is missing and may not be created, or cannot be
    /// created or resolved.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let root = prepare_root(&self.stage.0, self.create_root).await?;

        let storage = Storage {
            inner: Arc::new(StorageInner {
                root,
                compression: self.compression,
                quota: self.quota,
                tmp_counter: AtomicU64::new(0),
            }),
        };
        storage.purge_tmp().await;

        info!(
            root = %storage.root().display(),
            compression = ?storage.compression(),
            quota = ?storage.quota(),
            "Storage connected"
        );
        Ok(storage)
    }
}

async fn prepare_root(root: &Path, create: bool) -> Result<PathBuf, StorageError> {
    if create {
        fs::create_dir_all(root)
            .await
            .context(format!("Cannot create storage root {}", root.display()))?;
    }
    fs::canonicalize(root).await.context(format!("Cannot resolve storage root {}", root.display()))
}
