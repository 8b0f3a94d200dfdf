use crate::error::StorageError;
use crate::key::StorageKey;
use crate::store::KeyValueStore;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An in-process [`KeyValueStore`].
///
/// Behaves like browser local storage: values live for the lifetime of the handle (clones share
/// them) and an optional quota is measured in bytes of keys plus values. Useful for tests and
/// throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: RwLock<FxHashMap<String, String>>,
    quota: Option<u64>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(bytes: u64) -> Self {
        Self { inner: Arc::new(MemoryInner { quota: Some(bytes), ..MemoryInner::default() }) }
    }

    /// Makes every following `set` fail with an I/O error until switched off again.
    pub fn fail_writes(&self, enabled: bool) {
        self.inner.fail_writes.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn used_bytes(&self) -> u64 {
        self.inner.values.read().iter().map(|(k, v)| entry_size(k, v)).sum()
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.values.read().get(key).cloned()
    }

    /// Stores a value bypassing quota and failure injection, e.g. to seed corrupted data.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.values.write().insert(key.into(), value.into());
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = StorageKey::try_from(key)?;

        if self.inner.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Io {
                source: std::io::Error::other("write failure injected"),
                context: Some(key.to_string().into()),
            });
        }

        let mut values = self.inner.values.write();
        if let Some(quota) = self.inner.quota {
            let others: u64 = values
                .iter()
                .filter(|(k, _)| k.as_str() != key.as_str())
                .map(|(k, v)| entry_size(k, v))
                .sum();
            let needed = others.saturating_add(entry_size(key.as_str(), value));
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    needed,
                    quota,
                    context: Some(key.to_string().into()),
                });
            }
        }

        values.insert(key.to_string(), value.to_owned());
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = StorageKey::try_from(key)?;
        Ok(self.inner.values.read().get(key.as_str()).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.put(key, value)
    }
}

fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quota_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").await.unwrap();

        let err = store.set("k", "this value is far too large").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("small"));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        assert!(matches!(store.set("k", "v").await, Err(StorageError::Io { .. })));
        assert!(store.get("k").await.unwrap().is_none());

        store.fail_writes(false);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.raw("k").as_deref(), Some("v"));
    }
}
