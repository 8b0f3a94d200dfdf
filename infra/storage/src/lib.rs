//! Durable, sandboxed key-value storage for application snapshots.
//!
//! Every value is a UTF-8 string stored under a validated key. Two backends implement the
//! [`KeyValueStore`] seam:
//!
//! - **[`Storage`]**: one file per key under a canonical root directory. Writes use a unique
//!   temp file, `fsync`, and `rename`, so a crash never leaves a half-written value behind.
//!   Optional LZ4 compression and a byte quota are configured through [`StorageBuilder`].
//! - **[`MemoryStore`]**: an in-process map with the same quota semantics, for tests and
//!   throwaway sessions.
//!
//! A failed write never replaces the previous value.
//!
//! # Examples
//!
//! ```rust
//! use boxdraft_storage::{KeyValueStore, MemoryStore, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     let store = MemoryStore::with_quota(64);
//!     store.set("box_draft_app_v1", r#"{"players":[]}"#).await?;
//!
//!     let err = store.set("box_draft_app_v1", &"x".repeat(128)).await.unwrap_err();
//!     assert!(matches!(err, StorageError::QuotaExceeded { .. }));
//!     assert_eq!(store.get("box_draft_app_v1").await?.as_deref(), Some(r#"{"players":[]}"#));
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod key;
mod maintenance;
mod memory;
mod store;

pub use builder::{Rooted, StorageBuilder, Unrooted};
pub use engine::{Compression, Storage};
pub use error::{StorageError, StorageErrorExt};
pub use key::StorageKey;
pub use memory::MemoryStore;
pub use store::KeyValueStore;
