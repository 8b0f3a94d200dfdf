use boxdraft_domain::AppState;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// Buffer of the mutation broadcast. Slower receivers skip ahead.
pub(crate) const EVENT_CAPACITY: usize = 128;

/// A mutation that was applied to the registry.
///
/// Published after the snapshot has been updated (and the persist attempted), so a receiver
/// that reads [`Registry::snapshot`](crate::Registry::snapshot) already sees the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    SettingsUpdated,
    QuestionAdded { question_id: String },
    QuestionUpdated { question_id: String },
    QuestionDeleted { question_id: String },
    BoxUpdated { box_id: String },
    PlayerRegistered { player_id: String },
    PlayerDeleted { player_id: String },
    /// Capacity-checked self-service join.
    BoxSelected { player_id: String, box_id: String, previous: Option<String> },
    /// Administrator override; `box_id` is `None` when the player was unassigned.
    PlayerMoved { player_id: String, box_id: Option<String>, previous: Option<String> },
    PlayersReset { removed: usize },
}

impl RegistryEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SettingsUpdated => "settings_updated",
            Self::QuestionAdded { .. } => "question_added",
            Self::QuestionUpdated { .. } => "question_updated",
            Self::QuestionDeleted { .. } => "question_deleted",
            Self::BoxUpdated { .. } => "box_updated",
            Self::PlayerRegistered { .. } => "player_registered",
            Self::PlayerDeleted { .. } => "player_deleted",
            Self::BoxSelected { .. } => "box_selected",
            Self::PlayerMoved { .. } => "player_moved",
            Self::PlayersReset { .. } => "players_reset",
        }
    }
}

/// Ergonomic receiving for registry change channels.
///
/// For the event broadcast, a lagging receiver continues from the oldest event still buffered
/// and logs how many were skipped. For the snapshot watch, the call waits for the next change
/// and returns the latest snapshot.
pub trait ChangeReceiverExt<T> {
    /// The next change, `None` once the registry is gone.
    fn next_change(&mut self) -> impl Future<Output = Option<T>> + Send;
}

impl ChangeReceiverExt<RegistryEvent> for broadcast::Receiver<RegistryEvent> {
    async fn next_change(&mut self) -> Option<RegistryEvent> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(skipped, "Registry event receiver lagged; continuing from latest");
                    }
                    return Some(event);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(skipped = n, total_skipped = skipped, "Registry event receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl ChangeReceiverExt<Arc<AppState>> for watch::Receiver<Arc<AppState>> {
    async fn next_change(&mut self) -> Option<Arc<AppState>> {
        match self.changed().await {
            Ok(()) => Some(self.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
