//! Registry feature slice.
//!
//! [`Registry`] is the only owner of the box draft state: questions, boxes, players and event
//! settings. Every other slice reads a snapshot and calls the operations exposed here.
//!
//! * Each mutation runs under one async lock, so "count occupants, then assign" can never
//!   interleave with another operation on the same handle.
//! * After an applied mutation the whole [`AppState`] is written to the [`KeyValueStore`] under
//!   a single key. Write failures are logged and swallowed; the in-memory snapshot stays
//!   authoritative.
//! * Observers get the latest snapshot through a `watch` channel and a description of every
//!   applied mutation through a `broadcast` channel.
//!
//! ```rust
//! use boxdraft_registry::{Registry, Selection};
//! use boxdraft_storage::MemoryStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = Registry::open(MemoryStore::new(), "box_draft_app_v1").await;
//! registry.register_player(boxdraft_domain::Player {
//!     id: "p_1".into(),
//!     name: "Ada".into(),
//!     ..Default::default()
//! }).await;
//!
//! let joined = registry.select_box("p_1", "box-1").await;
//! assert_eq!(joined, Selection::Joined { previous: None });
//! assert_eq!(registry.snapshot().occupancy("box-1"), 1);
//! # }
//! ```
//!
//! [`AppState`]: boxdraft_domain::AppState
//! [`KeyValueStore`]: boxdraft_storage::KeyValueStore

mod event;
mod persistence;
mod registry;
mod reset;
mod selection;

pub use event::{ChangeReceiverExt, RegistryEvent};
pub use registry::Registry;
pub use reset::PendingReset;
pub use selection::{Rejection, Selection};
