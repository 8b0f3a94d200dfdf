use boxdraft_domain::{DraftBox, Question, QuestionType, Settings};

/// Input of the question editor. `editing` is the id of the question being edited, `None`
/// when adding a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub editing: Option<String>,
    pub label: String,
    pub description: String,
    pub kind: QuestionType,
    pub required: bool,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            editing: None,
            label: String::new(),
            description: String::new(),
            kind: QuestionType::Text,
            required: true,
        }
    }
}

impl QuestionDraft {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    /// Prefills the editor from an existing question.
    #[must_use]
    pub fn edit(question: &Question) -> Self {
        Self {
            editing: Some(question.id.clone()),
            label: question.label.clone(),
            description: question.description.clone().unwrap_or_default(),
            kind: question.kind,
            required: question.required,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: QuestionType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Input of the box editor. Boxes can be renamed and resized, never created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxDraft {
    pub id: String,
    pub name: String,
    pub capacity: u32,
}

impl BoxDraft {
    #[must_use]
    pub fn edit(draft_box: &DraftBox) -> Self {
        Self { id: draft_box.id.clone(), name: draft_box.name.clone(), capacity: draft_box.capacity }
    }
}

/// Input of the event settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub title: String,
    pub description: String,
    /// External URL, `data:` URL, or empty for no banner.
    pub banner_url: String,
    /// Clamped to `0..=100` on save.
    pub banner_position: i64,
    pub show_teammates: bool,
}

impl SettingsDraft {
    /// Prefills the form from the current settings.
    #[must_use]
    pub fn edit(settings: &Settings) -> Self {
        Self {
            title: settings.event_title.clone(),
            description: settings.event_description.clone(),
            banner_url: settings.banner_url.clone().unwrap_or_default(),
            banner_position: i64::from(settings.banner_position()),
            show_teammates: settings.teammates_visible(),
        }
    }

    pub(crate) fn into_settings(self) -> Settings {
        let position = u8::try_from(self.banner_position.clamp(0, 100)).unwrap_or(50);
        Settings {
            event_title: self.title,
            event_description: self.description,
            banner_url: Some(self.banner_url),
            banner_position: Some(position),
            show_teammates: Some(self.show_teammates),
        }
    }
}

/// Where a dragged player card was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Box(String),
    Unassigned,
}

impl DropTarget {
    #[must_use]
    pub fn box_id(&self) -> Option<&str> {
        match self {
            Self::Box(id) => Some(id),
            Self::Unassigned => None,
        }
    }
}
