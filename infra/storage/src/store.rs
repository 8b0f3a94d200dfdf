use crate::error::StorageError;
use std::future::Future;
use std::sync::Arc;

/// A durable string-to-string store.
///
/// This is the only persistence seam the registry depends on. Implementations must make
/// `set` all-or-nothing: after a failed write, `get` still returns the previous value.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, `None` when nothing was stored yet.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set(key, value)
    }
}
