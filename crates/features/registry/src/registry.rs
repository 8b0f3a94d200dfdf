use crate::event::{EVENT_CAPACITY, RegistryEvent};
use crate::persistence;
use crate::reset::PendingReset;
use crate::selection::{Rejection, Selection};
use boxdraft_domain::state::capacity_of;
use boxdraft_domain::{AppState, DraftBox, Player, Question, Settings};
use boxdraft_storage::KeyValueStore;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast, watch};
use tracing::{debug, info, warn};

/// Result of a state transition computed under the lock.
enum Change<R> {
    Applied { result: R, event: RegistryEvent },
    Unchanged(R),
}

/// Shared state behind a [`Registry`] handle.
struct RegistryInner<S> {
    state: Mutex<AppState>,
    store: S,
    key: String,
    snapshot_tx: watch::Sender<Arc<AppState>>,
    events_tx: broadcast::Sender<RegistryEvent>,
}

/// The single owner of the box draft state.
///
/// A cheap, cloneable handle; all clones share one snapshot. See the crate docs for the
/// persistence and notification rules.
pub struct Registry<S: KeyValueStore> {
    inner: Arc<RegistryInner<S>>,
}

impl<S: KeyValueStore> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStore> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Registry")
            .field("key", &self.inner.key)
            .field("questions", &snapshot.questions.len())
            .field("players", &snapshot.players.len())
            .field("boxes", &snapshot.boxes.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Registry<S> {
    /// Loads the snapshot stored under `key`, or the seed state when there is none or it
    /// cannot be parsed. Nothing is written until the first mutation.
    pub async fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = persistence::load(&store, &key).await;
        Self::with_state(store, key, state)
    }

    /// Starts from an explicit state instead of loading one.
    pub fn with_state(store: S, key: impl Into<String>, state: AppState) -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(state.clone()));
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(RegistryInner {
                state: Mutex::new(state),
                store,
                key: key.into(),
                snapshot_tx,
                events_tx,
            }),
        }
    }

    /// The current state. Cheap; never waits for a running mutation.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AppState> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Latest-value channel of the snapshot, updated after every applied mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Fan-out channel describing each applied mutation.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<RegistryEvent> {
        self.inner.events_tx.subscribe()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Replaces the settings singleton as a whole. No validation.
    pub async fn update_settings(&self, settings: Settings) {
        self.mutate("update_settings", move |state| {
            state.settings = settings;
            Change::Applied { result: (), event: RegistryEvent::SettingsUpdated }
        })
        .await;
    }

    /// Appends a question as given. The caller picks a unique id and sets `order` to the
    /// current question count.
    pub async fn add_question(&self, question: Question) {
        self.mutate("add_question", move |state| {
            let question_id = question.id.clone();
            state.questions.push(question);
            Change::Applied { result: (), event: RegistryEvent::QuestionAdded { question_id } }
        })
        .await;
    }

    /// Replaces the question with the same id. Returns `false` if there is none.
    pub async fn update_question(&self, question: Question) -> bool {
        self.mutate("update_question", move |state| {
            let Some(slot) = state.questions.iter_mut().find(|q| q.id == question.id) else {
                return Change::Unchanged(false);
            };
            let question_id = question.id.clone();
            *slot = question;
            Change::Applied { result: true, event: RegistryEvent::QuestionUpdated { question_id } }
        })
        .await
    }

    /// Removes a question. Answers players gave to it are kept.
    pub async fn delete_question(&self, question_id: &str) -> bool {
        self.mutate("delete_question", |state| {
            let before = state.questions.len();
            state.questions.retain(|q| q.id != question_id);
            if state.questions.len() == before {
                return Change::Unchanged(false);
            }
            Change::Applied {
                result: true,
                event: RegistryEvent::QuestionDeleted { question_id: question_id.to_owned() },
            }
        })
        .await
    }

    /// Renames a box or changes its capacity. Players already inside are never evicted, so a
    /// reduced capacity can leave the box over-full.
    pub async fn update_box(&self, draft_box: DraftBox) -> bool {
        self.mutate("update_box", move |state| {
            let Some(slot) = state.boxes.iter_mut().find(|b| b.id == draft_box.id) else {
                return Change::Unchanged(false);
            };
            slot.name = draft_box.name;
            slot.capacity = draft_box.capacity;
            Change::Applied {
                result: true,
                event: RegistryEvent::BoxUpdated { box_id: draft_box.id },
            }
        })
        .await
    }

    /// Appends a newly registered player. Any box assignment on the input is cleared.
    pub async fn register_player(&self, mut player: Player) {
        player.selected_box_id = None;
        self.mutate("register_player", move |state| {
            let player_id = player.id.clone();
            state.players.push(player);
            Change::Applied { result: (), event: RegistryEvent::PlayerRegistered { player_id } }
        })
        .await;
    }

    pub async fn delete_player(&self, player_id: &str) -> bool {
        self.mutate("delete_player", |state| {
            let before = state.players.len();
            state.players.retain(|p| p.id != player_id);
            if state.players.len() == before {
                return Change::Unchanged(false);
            }
            Change::Applied {
                result: true,
                event: RegistryEvent::PlayerDeleted { player_id: player_id.to_owned() },
            }
        })
        .await
    }

    /// Self-service assignment, guarded by capacity.
    ///
    /// Counting the occupants and assigning happen under the same lock, so concurrent calls
    /// can never push a box above its capacity. Selecting the current box changes nothing.
    pub async fn select_box(&self, player_id: &str, box_id: &str) -> Selection {
        self.mutate("select_box", |state| {
            let Some(draft_box) = state.box_by_id(box_id) else {
                return Change::Unchanged(Selection::Rejected(Rejection::UnknownBox));
            };
            let capacity = draft_box.capacity;
            let limit = capacity_of(draft_box);
            let occupants = state.occupancy(box_id);

            let Some(player) = state.players.iter_mut().find(|p| p.id == player_id) else {
                return Change::Unchanged(Selection::Rejected(Rejection::UnknownPlayer));
            };
            if player.is_in(box_id) {
                return Change::Unchanged(Selection::AlreadyMember);
            }
            if occupants >= limit {
                return Change::Unchanged(Selection::Rejected(Rejection::BoxFull {
                    capacity,
                    occupants,
                }));
            }

            let previous = player.selected_box_id.replace(box_id.to_owned());
            Change::Applied {
                result: Selection::Joined { previous: previous.clone() },
                event: RegistryEvent::BoxSelected {
                    player_id: player_id.to_owned(),
                    box_id: box_id.to_owned(),
                    previous,
                },
            }
        })
        .await
    }

    /// Administrator override: assigns without any capacity check, `None` unassigns.
    ///
    /// Returns whether the player exists. The target box is not validated.
    pub async fn move_player(&self, player_id: &str, box_id: Option<&str>) -> bool {
        self.mutate("move_player", |state| {
            let Some(player) = state.players.iter_mut().find(|p| p.id == player_id) else {
                return Change::Unchanged(false);
            };
            if player.selected_box_id.as_deref() == box_id {
                return Change::Unchanged(true);
            }

            let previous = std::mem::replace(&mut player.selected_box_id, box_id.map(str::to_owned));
            if let Some(target) = box_id
                && state.box_by_id(target).is_some_and(|b| state.occupancy(target) > capacity_of(b))
            {
                warn!(player_id, box_id = target, "Box is over capacity after override");
            }
            Change::Applied {
                result: true,
                event: RegistryEvent::PlayerMoved {
                    player_id: player_id.to_owned(),
                    box_id: box_id.map(str::to_owned),
                    previous,
                },
            }
        })
        .await
    }

    /// First step of clearing all players. Nothing happens until
    /// [`PendingReset::confirm`] is awaited.
    #[must_use = "The reset only happens once the pending reset is confirmed"]
    pub fn request_reset(&self) -> PendingReset<S> {
        debug!(players = self.snapshot().players.len(), "Player reset requested");
        PendingReset::new(self.clone())
    }

    /// Removes every player; questions, boxes and settings are untouched.
    pub(crate) async fn reset_players(&self) -> usize {
        self.mutate("reset_players", |state| {
            let removed = state.players.len();
            if removed == 0 {
                return Change::Unchanged(0);
            }
            state.players.clear();
            Change::Applied { result: removed, event: RegistryEvent::PlayersReset { removed } }
        })
        .await
    }

    async fn mutate<R>(
        &self,
        operation: &'static str,
        transition: impl FnOnce(&mut AppState) -> Change<R>,
    ) -> R {
        let mut state = self.inner.state.lock().await;

        let (result, event) = match transition(&mut state) {
            Change::Applied { result, event } => (result, event),
            Change::Unchanged(result) => {
                debug!(operation, "Registry unchanged");
                return result;
            },
        };

        let persisted = persistence::persist(&self.inner.store, &self.inner.key, &state).await;
        self.inner.snapshot_tx.send_replace(Arc::new(state.clone()));
        drop(state);

        info!(operation, event = event.name(), persisted, "Registry updated");
        // No receivers is fine.
        let _ = self.inner.events_tx.send(event);

        result
    }
}
