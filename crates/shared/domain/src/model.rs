use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers of one player, keyed by question id.
///
/// Keys of deleted questions are kept as-is.
pub type Answers = BTreeMap<String, String>;

/// The input kind of a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single-line text. The first question of this type names the player.
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    Email,
    Number,
}

impl QuestionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Number => "number",
        }
    }
}

/// A form field definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub required: bool,
    /// Render position. Not necessarily unique or contiguous.
    pub order: i64,
}

/// A capacity-limited team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBox {
    pub id: String,
    pub name: String,
    pub capacity: u32,
}

/// A registrant. Only `selected_box_id` changes after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub answers: Answers,
    pub selected_box_id: Option<String>,
    /// Milliseconds since the UNIX epoch.
    pub registered_at: i64,
}

impl Player {
    #[must_use]
    pub fn is_in(&self, box_id: &str) -> bool {
        self.selected_box_id.as_deref() == Some(box_id)
    }

    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.selected_box_id.is_some()
    }
}

/// Event-wide settings singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub event_title: String,
    pub event_description: String,
    /// External URL or an embedded `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    /// Vertical focus of the banner, percent from the top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_position: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_teammates: Option<bool>,
}

impl Settings {
    pub const DEFAULT_BANNER_POSITION: u8 = 50;

    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner_url.as_deref().filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn banner_position(&self) -> u8 {
        self.banner_position.unwrap_or(Self::DEFAULT_BANNER_POSITION)
    }

    /// Missing flag means visible.
    #[must_use]
    pub fn teammates_visible(&self) -> bool {
        self.show_teammates.unwrap_or(true)
    }
}
