use crate::error::RegistrationError;
use crate::policy::{Submission, derive_name};
use crate::view::{BoxView, Teammate};
use boxdraft_domain::Player;
use boxdraft_domain::constants::PLAYER_ID_PREFIX;
use boxdraft_kernel::prefixed_id;
use boxdraft_registry::{Registry, Rejection, Selection};
use boxdraft_storage::KeyValueStore;
use chrono::Utc;
use std::fmt;
use tracing::{debug, info};

/// Where a player stands in the self-service flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Filling in the form.
    Form,
    /// Registered, picking a box.
    Boxes,
    /// Registered and assigned. Switching boxes is still allowed.
    Done,
}

/// The player-facing registration flow: `Form -> Boxes -> Done`.
///
/// Owns nothing but transient input; the player record lives in the [`Registry`].
pub struct RegistrationFlow<S: KeyValueStore> {
    registry: Registry<S>,
    step: Step,
    submission: Submission,
    player_id: Option<String>,
}

impl<S: KeyValueStore> fmt::Debug for RegistrationFlow<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationFlow")
            .field("step", &self.step)
            .field("player_id", &self.player_id)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> RegistrationFlow<S> {
    #[must_use]
    pub fn new(registry: Registry<S>) -> Self {
        Self { registry, step: Step::Form, submission: Submission::new(), player_id: None }
    }

    /// Continues the flow of an already registered player.
    ///
    /// # Errors
    /// [`RegistrationError::UnknownPlayer`] if no such player is registered.
    pub fn resume(registry: Registry<S>, player_id: &str) -> Result<Self, RegistrationError> {
        let assigned = registry
            .snapshot()
            .player(player_id)
            .map(Player::is_assigned)
            .ok_or_else(|| RegistrationError::UnknownPlayer {
                player_id: player_id.to_owned(),
                context: None,
            })?;

        Ok(Self {
            registry,
            step: if assigned { Step::Done } else { Step::Boxes },
            submission: Submission::new(),
            player_id: Some(player_id.to_owned()),
        })
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// The current player as stored in the registry.
    #[must_use]
    pub fn player(&self) -> Option<Player> {
        let id = self.player_id.as_deref()?;
        self.registry.snapshot().player(id).cloned()
    }

    /// Types an answer into the form.
    pub fn answer(&mut self, question_id: impl Into<String>, text: impl Into<String>) {
        self.submission.set(question_id, text);
    }

    #[must_use]
    pub const fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Validates the form, registers the player and moves on to box selection.
    ///
    /// # Errors
    /// [`RegistrationError::MissingAnswers`] when required questions are blank; nothing is
    /// registered in that case. [`RegistrationError::Step`] outside the form step.
    pub async fn submit(&mut self) -> Result<Player, RegistrationError> {
        if self.step != Step::Form {
            return Err(RegistrationError::Step {
                message: "The form was already submitted".into(),
                context: None,
            });
        }

        let snapshot = self.registry.snapshot();
        self.submission.validate(&snapshot.questions)?;

        let answers = self.submission.answers().clone();
        let player = Player {
            id: prefixed_id(PLAYER_ID_PREFIX),
            name: derive_name(&snapshot.questions, &answers),
            answers,
            selected_box_id: None,
            registered_at: Utc::now().timestamp_millis(),
        };

        self.registry.register_player(player.clone()).await;
        info!(player_id = %player.id, name = %player.name, "Player registered");

        self.player_id = Some(player.id.clone());
        self.step = Step::Boxes;
        Ok(player)
    }

    /// Joins a box, re-checking capacity first.
    ///
    /// Choosing the box the player is already in changes nothing and returns
    /// [`Selection::AlreadyMember`].
    ///
    /// # Errors
    /// [`RegistrationError::BoxFull`] and [`RegistrationError::UnknownBox`] leave the player
    /// where they were. [`RegistrationError::Step`] before the form was submitted.
    pub async fn choose_box(&mut self, box_id: &str) -> Result<Selection, RegistrationError> {
        let Some(player_id) = self.player_id.clone() else {
            return Err(RegistrationError::Step {
                message: "Submit the form before choosing a box".into(),
                context: None,
            });
        };

        let snapshot = self.registry.snapshot();
        let Some(target) = snapshot.box_by_id(box_id) else {
            return Err(RegistrationError::UnknownBox { box_id: box_id.to_owned(), context: None });
        };
        let Some(player) = snapshot.player(&player_id) else {
            return Err(RegistrationError::UnknownPlayer { player_id, context: None });
        };

        if player.is_in(box_id) {
            debug!(player_id = %player.id, box_id, "Player already in box");
            return Ok(Selection::AlreadyMember);
        }

        if snapshot.is_full(box_id) {
            return Err(RegistrationError::BoxFull {
                name: target.name.clone(),
                capacity: target.capacity,
                occupants: snapshot.occupancy(box_id),
                context: None,
            });
        }

        let name = target.name.clone();
        match self.registry.select_box(&player_id, box_id).await {
            Selection::Joined { previous } => {
                info!(player_id = %player_id, box_id, previous = ?previous, "Player joined box");
                self.step = Step::Done;
                Ok(Selection::Joined { previous })
            },
            Selection::AlreadyMember => Ok(Selection::AlreadyMember),
            Selection::Rejected(Rejection::BoxFull { capacity, occupants }) => {
                Err(RegistrationError::BoxFull {
                    name,
                    capacity,
                    occupants,
                    context: Some("Filled up while choosing".into()),
                })
            },
            Selection::Rejected(Rejection::UnknownBox) => {
                Err(RegistrationError::UnknownBox { box_id: box_id.to_owned(), context: None })
            },
            Selection::Rejected(Rejection::UnknownPlayer) => {
                Err(RegistrationError::UnknownPlayer { player_id, context: None })
            },
        }
    }

    /// Starts over for the next registrant. The registered player stays registered.
    pub fn restart(&mut self) {
        self.step = Step::Form;
        self.submission = Submission::new();
        self.player_id = None;
    }

    /// The box screen as seen by the current player.
    #[must_use]
    pub fn boxes(&self) -> Vec<BoxView> {
        BoxView::build(&self.registry.snapshot(), self.player_id.as_deref())
    }

    /// Members of the player's own box, `None` while unassigned or when hidden by the admin.
    #[must_use]
    pub fn teammates(&self) -> Option<Vec<Teammate>> {
        self.boxes().into_iter().find(|b| b.is_mine).and_then(|b| b.teammates)
    }
}
