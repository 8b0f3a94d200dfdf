use crate::banner::BannerEncoder;
use crate::dashboard::Dashboard;
use crate::error::AdminError;
use crate::forms::{BoxDraft, DropTarget, QuestionDraft, SettingsDraft};
use boxdraft_domain::constants::QUESTION_ID_PREFIX;
use boxdraft_domain::{DraftBox, Question, Settings};
use boxdraft_kernel::prefixed_id;
use boxdraft_registry::{PendingReset, Registry};
use boxdraft_storage::KeyValueStore;
use std::fmt;
use std::path::Path;
use tracing::info;

/// An authenticated administrator.
///
/// Only [`AdminGate::login`](crate::AdminGate::login) hands these out, which keeps the
/// capacity-bypassing operations behind the password.
pub struct AdminSession<S: KeyValueStore> {
    registry: Registry<S>,
    banner: BannerEncoder,
}

impl<S: KeyValueStore> fmt::Debug for AdminSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession").field("banner", &self.banner).finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> AdminSession<S> {
    pub(crate) const fn new(registry: Registry<S>, banner: BannerEncoder) -> Self {
        Self { registry, banner }
    }

    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.registry.snapshot())
    }

    /// Saves the settings form. The banner position is clamped to `0..=100`.
    pub async fn save_settings(&self, draft: SettingsDraft) -> Settings {
        let settings = draft.into_settings();
        self.registry.update_settings(settings.clone()).await;
        settings
    }

    /// Encodes an image file as the banner `data:` URL, ready for [`SettingsDraft::banner_url`].
    ///
    /// # Errors
    /// See [`BannerEncoder::encode_file`].
    pub async fn encode_banner(&self, path: impl AsRef<Path>) -> Result<String, AdminError> {
        self.banner.encode_file(path).await
    }

    /// Adds a new question or updates the one being edited.
    ///
    /// New questions get a fresh `q_` id and go to the end; edits keep id and order.
    ///
    /// # Errors
    /// [`AdminError::Validation`] for a blank label, [`AdminError::UnknownQuestion`] when the
    /// edited question no longer exists.
    pub async fn save_question(&self, draft: QuestionDraft) -> Result<Question, AdminError> {
        let label = draft.label.trim();
        if label.is_empty() {
            return Err(AdminError::validation("Question label cannot be empty"));
        }
        let description = Some(draft.description.trim().to_owned()).filter(|d| !d.is_empty());

        let snapshot = self.registry.snapshot();
        match draft.editing {
            Some(id) => {
                let Some(existing) = snapshot.question(&id) else {
                    return Err(AdminError::UnknownQuestion { id, context: None });
                };
                let question = Question {
                    id: existing.id.clone(),
                    label: label.to_owned(),
                    description,
                    kind: draft.kind,
                    required: draft.required,
                    order: existing.order,
                };
                if !self.registry.update_question(question.clone()).await {
                    return Err(AdminError::UnknownQuestion { id: question.id, context: None });
                }
                Ok(question)
            },
            None => {
                let question = Question {
                    id: prefixed_id(QUESTION_ID_PREFIX),
                    label: label.to_owned(),
                    description,
                    kind: draft.kind,
                    required: draft.required,
                    order: snapshot.next_question_order(),
                };
                self.registry.add_question(question.clone()).await;
                Ok(question)
            },
        }
    }

    /// # Errors
    /// [`AdminError::UnknownQuestion`] if there is no such question.
    pub async fn delete_question(&self, question_id: &str) -> Result<(), AdminError> {
        if self.registry.delete_question(question_id).await {
            Ok(())
        } else {
            Err(AdminError::UnknownQuestion { id: question_id.to_owned(), context: None })
        }
    }

    /// Renames or resizes a box. Lowering the capacity never evicts anyone.
    ///
    /// # Errors
    /// [`AdminError::Validation`] for a blank name or zero capacity, [`AdminError::UnknownBox`]
    /// for an unknown id.
    pub async fn save_box(&self, draft: BoxDraft) -> Result<DraftBox, AdminError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(AdminError::validation("Box name cannot be empty"));
        }
        if draft.capacity == 0 {
            return Err(AdminError::validation("Box capacity must be at least 1"));
        }

        let draft_box = DraftBox { id: draft.id, name: name.to_owned(), capacity: draft.capacity };
        if self.registry.update_box(draft_box.clone()).await {
            Ok(draft_box)
        } else {
            Err(AdminError::UnknownBox { id: draft_box.id, context: None })
        }
    }

    /// Moves a player to a box or back to the unassigned pool, ignoring capacity.
    ///
    /// # Errors
    /// [`AdminError::UnknownBox`] for a drop onto a box that does not exist,
    /// [`AdminError::UnknownPlayer`] if the player is gone.
    pub async fn drop_player(&self, player_id: &str, target: DropTarget) -> Result<(), AdminError> {
        if let DropTarget::Box(box_id) = &target
            && self.registry.snapshot().box_by_id(box_id).is_none()
        {
            return Err(AdminError::UnknownBox { id: box_id.clone(), context: None });
        }

        if self.registry.move_player(player_id, target.box_id()).await {
            info!(player_id, target = ?target, "Player dropped");
            Ok(())
        } else {
            Err(AdminError::UnknownPlayer { id: player_id.to_owned(), context: None })
        }
    }

    /// # Errors
    /// [`AdminError::UnknownPlayer`] if there is no such player.
    pub async fn delete_player(&self, player_id: &str) -> Result<(), AdminError> {
        if self.registry.delete_player(player_id).await {
            Ok(())
        } else {
            Err(AdminError::UnknownPlayer { id: player_id.to_owned(), context: None })
        }
    }

    /// Asks to remove every player. Nothing happens until the returned guard is confirmed.
    #[must_use = "The reset only happens once the pending reset is confirmed"]
    pub fn reset_players(&self) -> PendingReset<S> {
        self.registry.request_reset()
    }
}
