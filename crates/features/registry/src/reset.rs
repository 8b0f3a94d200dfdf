use crate::registry::Registry;
use boxdraft_storage::KeyValueStore;
use std::fmt;
use tracing::{debug, info};

/// A requested, not yet executed, removal of every player.
///
/// Obtained from [`Registry::request_reset`]. Awaiting [`confirm`](Self::confirm) clears the
/// players; [`cancel`](Self::cancel) or dropping the guard leaves everything as it was.
#[must_use = "The reset only happens once the pending reset is confirmed"]
pub struct PendingReset<S: KeyValueStore> {
    registry: Registry<S>,
    players: usize,
}

impl<S: KeyValueStore> PendingReset<S> {
    pub(crate) fn new(registry: Registry<S>) -> Self {
        let players = registry.snapshot().players.len();
        Self { registry, players }
    }

    /// Players registered when the reset was requested.
    #[must_use]
    pub const fn players(&self) -> usize {
        self.players
    }

    /// Removes every player and returns how many were removed. Questions, boxes and settings
    /// survive unchanged.
    pub async fn confirm(self) -> usize {
        let removed = self.registry.reset_players().await;
        info!(removed, "Player reset confirmed");
        removed
    }

    pub fn cancel(self) {
        debug!(players = self.players, "Player reset cancelled");
    }
}

impl<S: KeyValueStore> fmt::Debug for PendingReset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReset").field("players", &self.players).finish_non_exhaustive()
    }
}
