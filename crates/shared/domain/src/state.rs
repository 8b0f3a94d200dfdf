use crate::constants::{
    DEFAULT_BOX_CAPACITY, DEFAULT_BOX_COUNT, DEFAULT_BOX_NAME, DEFAULT_EVENT_DESCRIPTION,
    DEFAULT_EVENT_TITLE,
};
use crate::model::{DraftBox, Player, Question, QuestionType, Settings};
use serde::{Deserialize, Serialize};

/// The whole persisted application state.
///
/// Serialized as one JSON object. There is no schema version field; a value that
/// fails to parse is replaced by [`AppState::default`] on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub questions: Vec<Question>,
    pub players: Vec<Player>,
    pub boxes: Vec<DraftBox>,
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            players: Vec::new(),
            boxes: default_boxes(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event_title: DEFAULT_EVENT_TITLE.to_owned(),
            event_description: DEFAULT_EVENT_DESCRIPTION.to_owned(),
            banner_url: Some(String::new()),
            banner_position: Some(Self::DEFAULT_BANNER_POSITION),
            show_teammates: Some(true),
        }
    }
}

impl AppState {
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn box_by_id(&self, id: &str) -> Option<&DraftBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Players currently assigned to `box_id`, in registration order.
    pub fn occupants<'a>(&'a self, box_id: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| p.is_in(box_id))
    }

    #[must_use]
    pub fn occupancy(&self, box_id: &str) -> usize {
        self.occupants(box_id).count()
    }

    /// `true` when the box holds at least `capacity` players. Unknown boxes count as full.
    #[must_use]
    pub fn is_full(&self, box_id: &str) -> bool {
        self.box_by_id(box_id).is_none_or(|b| self.occupancy(box_id) >= capacity_of(b))
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_assigned())
    }

    /// Questions in render order. Equal `order` values keep their insertion order.
    #[must_use]
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut ordered: Vec<&Question> = self.questions.iter().collect();
        ordered.sort_by_key(|q| q.order);
        ordered
    }

    /// The `order` a newly appended question receives.
    #[must_use]
    pub fn next_question_order(&self) -> i64 {
        i64::try_from(self.questions.len()).unwrap_or(i64::MAX)
    }
}

/// Capacity as a count comparable with [`AppState::occupancy`].
#[must_use]
pub fn capacity_of(draft_box: &DraftBox) -> usize {
    usize::try_from(draft_box.capacity).unwrap_or(usize::MAX)
}

fn default_questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_owned(),
            label: "Full Name".to_owned(),
            description: Some("Enter your legal first and last name".to_owned()),
            kind: QuestionType::Text,
            required: true,
            order: 0,
        },
        Question {
            id: "q2".to_owned(),
            label: "Email Address".to_owned(),
            description: None,
            kind: QuestionType::Email,
            required: true,
            order: 1,
        },
        Question {
            id: "q3".to_owned(),
            label: "In-Game Username".to_owned(),
            description: Some("Your gamer tag or handle".to_owned()),
            kind: QuestionType::Text,
            required: false,
            order: 2,
        },
    ]
}

fn default_boxes() -> Vec<DraftBox> {
    (1..=DEFAULT_BOX_COUNT)
        .map(|i| DraftBox {
            id: format!("box-{i}"),
            name: DEFAULT_BOX_NAME.to_owned(),
            capacity: DEFAULT_BOX_CAPACITY,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, box_id: Option<&str>) -> Player {
        Player {
            id: id.to_owned(),
            name: id.to_owned(),
            answers: crate::model::Answers::new(),
            selected_box_id: box_id.map(str::to_owned),
            registered_at: 0,
        }
    }

    #[test]
    fn default_snapshot_matches_seed() {
        let state = AppState::default();
        assert_eq!(state.questions.len(), 3);
        assert_eq!(state.boxes.len(), 8);
        assert!(state.players.is_empty());
        assert!(state.boxes.iter().all(|b| b.capacity == 5 && b.name == "Team"));
        assert_eq!(state.boxes[7].id, "box-8");
        assert_eq!(state.settings.banner_position(), 50);
        assert!(state.settings.teammates_visible());
        assert!(state.settings.banner().is_none());
    }

    #[test]
    fn occupancy_and_fullness() {
        let mut state = AppState::default();
        state.boxes[0].capacity = 2;
        state.players = vec![
            player("a", Some("box-1")),
            player("b", Some("box-1")),
            player("c", None),
            player("d", Some("box-2")),
        ];

        assert_eq!(state.occupancy("box-1"), 2);
        assert!(state.is_full("box-1"));
        assert!(!state.is_full("box-2"));
        assert!(state.is_full("missing"));
        assert_eq!(state.unassigned().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn ordered_questions_is_stable() {
        let mut state = AppState::default();
        state.questions[0].order = 5;
        state.questions[1].order = 2;
        state.questions[2].order = 2;

        let ids: Vec<_> = state.ordered_questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q2", "q3", "q1"]);
    }
}
