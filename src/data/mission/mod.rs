use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod editor;

pub use editor::{EditorError, EditorMode, MissionEditor, MoveDirection};

fn true_bool() -> bool {
    true
}

fn default_passing_score() -> u8 {
    70
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Pdf,
    Lecture,
    Image,
}

/// Reference to an uploaded file. Only the metadata is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileRef {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MissionContent {
    pub id: Uuid,
    pub kind: ContentKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    pub order: u32,
}

impl MissionContent {
    pub fn new(kind: ContentKind, order: u32) -> MissionContent {
        MissionContent {
            id: Uuid::now_v7(),
            kind,
            title: String::new(),
            description: String::new(),
            file: None,
            url: None,
            duration: None,
            order,
        }
    }

    /// Merges every field present in `update`.
    pub fn apply(&mut self, update: ContentUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(file) = update.file {
            self.file = Some(file);
        }
        if let Some(url) = update.url {
            self.url = Some(url);
        }
        if let Some(duration) = update.duration {
            self.duration = Some(duration);
        }
    }
}

/// Partial content update; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentUpdate {
    #[serde(default)]
    pub kind: Option<ContentKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MissionSettings {
    #[serde(default = "true_bool")]
    pub is_active: bool,
    #[serde(default = "true_bool")]
    pub allow_retakes: bool,
    /// Minutes, `0` means unlimited.
    #[serde(default)]
    pub time_limit: u32,
    #[serde(default = "default_passing_score")]
    pub passing_score: u8,
    #[serde(default)]
    pub show_answers: bool,
    #[serde(default = "true_bool")]
    pub allow_discussion: bool,
}

impl Default for MissionSettings {
    fn default() -> Self {
        MissionSettings {
            is_active: true,
            allow_retakes: true,
            time_limit: 0,
            passing_score: default_passing_score(),
            show_answers: false,
            allow_discussion: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Mission {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: Vec<MissionContent>,
    #[serde(default)]
    pub settings: MissionSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a mission while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MissionDraft {
    pub title: String,
    pub description: String,
    pub content: Vec<MissionContent>,
    pub settings: MissionSettings,
}

impl From<&Mission> for MissionDraft {
    fn from(mission: &Mission) -> Self {
        MissionDraft {
            title: mission.title.clone(),
            description: mission.description.clone(),
            content: mission.content.clone(),
            settings: mission.settings,
        }
    }
}

/// Partial update of the mission draft's own fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MissionDraftUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: Option<MissionSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_like_the_form() {
        let settings: MissionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, MissionSettings::default());
        assert!(settings.is_active);
        assert!(settings.allow_retakes);
        assert_eq!(settings.passing_score, 70);
        assert_eq!(settings.time_limit, 0);
        assert!(!settings.show_answers);
        assert!(settings.allow_discussion);
    }

    #[test]
    fn content_update_merges_only_present_fields() {
        let mut content = MissionContent::new(ContentKind::Video, 1);
        content.description = "keep me".to_string();

        content.apply(ContentUpdate {
            title: Some("Intro".to_string()),
            url: Some("https://example.com/intro.mp4".to_string()),
            ..Default::default()
        });

        assert_eq!(content.title, "Intro");
        assert_eq!(content.description, "keep me");
        assert_eq!(content.kind, ContentKind::Video);
        assert_eq!(content.order, 1);
        assert_eq!(content.url.as_deref(), Some("https://example.com/intro.mp4"));
    }

    #[test]
    fn content_kind_uses_lowercase_tags() {
        let kind: ContentKind = serde_json::from_str("\"pdf\"").unwrap();
        assert_eq!(kind, ContentKind::Pdf);
    }
}
