//! File-backed [`KeyValueStore`].
//!
//! One key is one `<key>.json` file directly under the canonical root. A value is staged in a
//! sibling temp file, synced, then renamed over the old file; a reader sees either the old or
//! the new snapshot, never a mix.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StorageKey;
use crate::maintenance;
use crate::store::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Taken temp names skipped before a write gives up.
const MAX_STAGE_ATTEMPTS: u32 = 64;

/// On-disk encoding of stored values.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    /// LZ4 block with the decompressed size prepended.
    Lz4,
}

impl Compression {
    fn pack(self, value: &str) -> Vec<u8> {
        match self {
            Self::None => value.as_bytes().to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(value.as_bytes()),
        }
    }

    fn unpack(self, bytes: Vec<u8>, path: &Path) -> Result<String, StorageError> {
        let bytes = match self {
            Self::None => bytes,
            Self::Lz4 => lz4_flex::decompress_size_prepended(&bytes)
                .context(format!("Not an LZ4 value: {}", path.display()))?,
        };
        String::from_utf8(bytes).context(format!("Value is not UTF-8: {}", path.display()))
    }
}

#[derive(Debug)]
pub(crate) struct StorageInner {
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    /// Byte budget for all values together, measured on disk.
    pub(crate) quota: Option<u64>,
    pub(crate) tmp_counter: AtomicU64,
}

/// Snapshot store rooted at one directory.
///
/// Clones share the same root and settings.
///
/// # Example
///
/// ```rust
/// use boxdraft_storage::{Compression, KeyValueStore, Storage, StorageError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let storage = Storage::builder()
///         .root(tmp.path().join("data"))
///         .compression(Compression::Lz4)
///         .quota(5 * 1024 * 1024)
///         .connect()
///         .await?;
///
///     storage.set("box_draft_app_v1", "{}").await?;
///     assert_eq!(storage.get("box_draft_app_v1").await?.as_deref(), Some("{}"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Storage {
    #[must_use = "Nothing is opened until .connect() is awaited"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.inner.compression
    }

    #[must_use]
    pub fn quota(&self) -> Option<u64> {
        self.inner.quota
    }

    /// The file that holds `key`.
    ///
    /// # Errors
    /// [`StorageError::InvalidKey`] for keys that are not plain file names.
    pub fn path_of(&self, key: &str) -> Result<PathBuf, StorageError> {
        let key = StorageKey::try_from(key)?;
        Ok(self.inner.root.join(key.file_name()))
    }

    /// # Errors
    /// [`StorageError::Decompress`] or [`StorageError::Encoding`] when the file holds something
    /// this store did not write, [`StorageError::Io`] when it cannot be read.
    pub async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_of(key)?;
        match fs::read(&path).await {
            Ok(bytes) => self.inner.compression.unpack(bytes, &path).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context(format!("Cannot read {}", path.display())),
        }
    }

    /// Replaces the value under `key`, all or nothing.
    ///
    /// # Errors
    /// [`StorageError::QuotaExceeded`] when the encoded value would push the root over its
    /// quota, [`StorageError::Io`] on disk failures. The previous value survives both.
    pub async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_of(key)?;
        let bytes = self.inner.compression.pack(value);
        self.ensure_fits(key, &path, bytes.len()).await?;

        let staged = self.stage(&path, &bytes).await?;
        if let Err(err) = commit(&staged, &path).await {
            discard(&staged).await;
            return Err(err);
        }
        sync_dir(&self.inner.root).await;

        debug!(key, bytes = bytes.len(), "Value committed");
        Ok(())
    }

    /// Bytes currently counted against the quota.
    pub async fn used_bytes(&self) -> u64 {
        maintenance::used_bytes(&self.inner.root, None).await
    }

    /// Deletes temp files abandoned by interrupted writes.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root).await;
    }

    async fn ensure_fits(&self, key: &str, path: &Path, len: usize) -> Result<(), StorageError> {
        let Some(quota) = self.inner.quota else {
            return Ok(());
        };
        let others = maintenance::used_bytes(&self.inner.root, Some(path)).await;
        let needed = others.saturating_add(len as u64);
        if needed > quota {
            warn!(key, needed, quota, "Write rejected by quota");
            return Err(StorageError::QuotaExceeded {
                needed,
                quota,
                context: Some(key.to_owned().into()),
            });
        }
        Ok(())
    }

    /// Writes `bytes` into a fresh temp file next to `target` and syncs it.
    async fn stage(&self, target: &Path, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let (mut file, staged) = self.open_staged(target).await?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            discard(&staged).await;
            return Err(err).context(format!("Cannot stage {}", staged.display()));
        }
        Ok(staged)
    }

    /// Creates the next free temp name. Names left by a killed process are skipped, not reused.
    async fn open_staged(&self, target: &Path) -> Result<(fs::File, PathBuf), StorageError> {
        let name = target.file_name().and_then(|n| n.to_str()).unwrap_or("value");
        let mut attempt = 0;
        loop {
            let seq = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
            let staged = target.with_file_name(format!("{name}{}{seq}", maintenance::TMP_MARKER));
            match fs::OpenOptions::new().create_new(true).write(true).open(&staged).await {
                Ok(file) => return Ok((file, staged)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists && attempt < MAX_STAGE_ATTEMPTS => {
                    debug!(path = %staged.display(), "Temp name taken, trying the next one");
                    attempt += 1;
                },
                Err(err) => return Err(err).context(format!("Cannot stage {}", staged.display())),
            }
        }
    }
}

impl KeyValueStore for Storage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, value).await
    }
}

/// Moves the staged file over `target`. Falls back to delete-then-rename where the platform
/// refuses to replace an existing file.
async fn commit(staged: &Path, target: &Path) -> Result<(), StorageError> {
    match fs::rename(staged, target).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            fs::remove_file(target).await.context(format!("Cannot replace {}", target.display()))?;
            fs::rename(staged, target).await.context(format!("Cannot commit {}", target.display()))
        },
        Err(err) => Err(err).context(format!("Cannot commit {}", target.display())),
    }
}

async fn discard(staged: &Path) {
    if let Err(err) = fs::remove_file(staged).await {
        warn!(path = %staged.display(), error = %err, "Staged file left behind");
    }
}

async fn sync_dir(dir: &Path) {
    let synced = async { fs::File::open(dir).await?.sync_all().await }.await;
    if let Err(err) = synced {
        warn!(path = %dir.display(), error = %err, "Directory sync failed");
    }
}
