//! Blocking directory scans, run on the blocking pool.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Infix of staged files: `<key>.json.draftmp.<seq>`.
pub(crate) const TMP_MARKER: &str = ".draftmp.";

/// Staged files younger than this may still belong to a running write.
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes staged files older than [`STALE_AFTER`].
pub(crate) async fn purge_tmp(root: &Path) {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || sweep(&root, now)).await {
        Ok(Sweep { removed: 0, failed: 0 }) => {},
        Ok(Sweep { removed, failed }) => info!(removed, failed, "Stale staged files swept"),
        Err(e) => error!(error = %e, "Staged file sweep panicked"),
    }
}

/// Total size of stored values under `root`, leaving out staged files and `except`.
pub(crate) async fn used_bytes(root: &Path, except: Option<&Path>) -> u64 {
    let root = root.to_path_buf();
    let except = except.map(Path::to_path_buf);

    tokio::task::spawn_blocking(move || {
        files(&root)
            .filter(|e| !is_staged(e) && except.as_deref() != Some(e.path()))
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum::<u64>()
    })
    .await
    .unwrap_or_else(|e| {
        error!(error = %e, "Usage scan panicked");
        0
    })
}

#[derive(Debug, Default)]
struct Sweep {
    removed: usize,
    failed: usize,
}

fn sweep(root: &Path, now: SystemTime) -> Sweep {
    let stale: Vec<PathBuf> = files(root)
        .filter(|e| is_staged(e) && age(e, now).is_none_or(|age| age > STALE_AFTER))
        .map(DirEntry::into_path)
        .collect();

    stale.iter().fold(Sweep::default(), |mut sweep, path| {
        match std::fs::remove_file(path) {
            Ok(()) => sweep.removed += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot remove staged file");
                sweep.failed += 1;
            },
        }
        sweep
    })
}

/// Regular files directly under `root`.
fn files(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
}

fn is_staged(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn age(entry: &DirEntry, now: SystemTime) -> Option<Duration> {
    let modified = entry.metadata().ok()?.modified().ok()?;
    now.duration_since(modified).ok()
}
