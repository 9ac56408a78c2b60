use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    ContentKind, ContentUpdate, FileRef, Mission, MissionContent, MissionDraft, MissionDraftUpdate,
};
use crate::util::non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Mission title is required.")]
    EmptyTitle,
    #[error("Passing score must be between 0 and 100, got {0}.")]
    InvalidPassingScore(u8),
    #[error("No mission is being edited.")]
    NotEditing,
    #[error("Mission {0} doesn't exist.")]
    MissionNotFound(Uuid),
    #[error("Content {0} doesn't exist in the mission draft.")]
    ContentNotFound(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "mission", rename_all = "snake_case")]
pub enum EditorMode {
    Idle,
    Creating,
    Editing(Uuid),
}

impl Default for EditorMode {
    fn default() -> Self {
        EditorMode::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Owns a classroom's missions and the single mission draft being worked on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissionEditor {
    missions: Vec<Mission>,
    mode: EditorMode,
    draft: MissionDraft,
}

impl MissionEditor {
    pub fn new() -> MissionEditor {
        MissionEditor::default()
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn into_missions(self) -> Vec<Mission> {
        self.missions
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &MissionDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.mode != EditorMode::Idle
    }

    /// Starts a new mission from a blank draft.
    pub fn create(&mut self) {
        self.draft = MissionDraft::default();
        self.mode = EditorMode::Creating;
    }

    /// Loads an existing mission into the draft.
    pub fn edit(&mut self, id: Uuid) -> Result<(), EditorError> {
        let mission = self
            .missions
            .iter()
            .find(|it| it.id == id)
            .ok_or(EditorError::MissionNotFound(id))?;

        self.draft = MissionDraft::from(mission);
        self.mode = EditorMode::Editing(id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.draft = MissionDraft::default();
        self.mode = EditorMode::Idle;
    }

    pub fn save(&mut self) -> Result<&Mission, EditorError> {
        self.save_at(Utc::now())
    }

    /// Validates the draft and writes it into the mission list.
    ///
    /// Failed validation leaves missions, draft and mode untouched.
    pub fn save_at(&mut self, now: DateTime<Utc>) -> Result<&Mission, EditorError> {
        if self.mode == EditorMode::Idle {
            return Err(EditorError::NotEditing);
        }
        if non_blank(&self.draft.title).is_none() {
            return Err(EditorError::EmptyTitle);
        }
        if self.draft.settings.passing_score > 100 {
            return Err(EditorError::InvalidPassingScore(
                self.draft.settings.passing_score,
            ));
        }

        let existing = match self.mode {
            EditorMode::Editing(id) => Some(
                self.missions
                    .iter()
                    .position(|it| it.id == id)
                    .ok_or(EditorError::MissionNotFound(id))?,
            ),
            _ => None,
        };

        let draft = std::mem::take(&mut self.draft);
        self.mode = EditorMode::Idle;

        let index = match existing {
            Some(index) => {
                let mission = &mut self.missions[index];
                mission.title = draft.title;
                mission.description = draft.description;
                mission.content = draft.content;
                mission.settings = draft.settings;
                mission.updated_at = now;
                index
            }
            None => {
                self.missions.push(Mission {
                    id: Uuid::now_v7(),
                    title: draft.title,
                    description: draft.description,
                    content: draft.content,
                    settings: draft.settings,
                    created_at: now,
                    updated_at: now,
                });
                self.missions.len() - 1
            }
        };

        tracing::debug!(mission = %self.missions[index].id, "saved mission");
        Ok(&self.missions[index])
    }

    /// Removes a saved mission. Deleting the mission under edit also drops the draft.
    pub fn delete(&mut self, id: Uuid) -> Result<Mission, EditorError> {
        let index = self
            .missions
            .iter()
            .position(|it| it.id == id)
            .ok_or(EditorError::MissionNotFound(id))?;

        if self.mode == EditorMode::Editing(id) {
            self.cancel();
        }

        Ok(self.missions.remove(index))
    }

    pub fn update_draft(&mut self, update: MissionDraftUpdate) -> Result<(), EditorError> {
        self.require_editing()?;

        if let Some(title) = update.title {
            self.draft.title = title;
        }
        if let Some(description) = update.description {
            self.draft.description = description;
        }
        if let Some(settings) = update.settings {
            self.draft.settings = settings;
        }
        Ok(())
    }

    pub fn add_content(&mut self, kind: ContentKind) -> Result<&MissionContent, EditorError> {
        self.require_editing()?;

        let order = self.draft.content.len() as u32 + 1;
        self.draft.content.push(MissionContent::new(kind, order));

        let last = self.draft.content.len() - 1;
        Ok(&self.draft.content[last])
    }

    pub fn update_content(
        &mut self,
        id: Uuid,
        update: ContentUpdate,
    ) -> Result<&MissionContent, EditorError> {
        let content = self.content_mut(id)?;
        content.apply(update);
        Ok(content)
    }

    /// Attaches an uploaded file; its name becomes the content title.
    pub fn attach_file(&mut self, id: Uuid, file: FileRef) -> Result<&MissionContent, EditorError> {
        let update = ContentUpdate {
            title: Some(file.name.clone()),
            file: Some(file),
            ..Default::default()
        };
        self.update_content(id, update)
    }

    pub fn remove_content(&mut self, id: Uuid) -> Result<MissionContent, EditorError> {
        self.require_editing()?;

        let index = self
            .draft
            .content
            .iter()
            .position(|it| it.id == id)
            .ok_or(EditorError::ContentNotFound(id))?;
        let removed = self.draft.content.remove(index);
        self.renumber();

        Ok(removed)
    }

    /// Swaps a content item with its neighbour. Moving past either end is a no-op.
    pub fn move_content(&mut self, id: Uuid, direction: MoveDirection) -> Result<(), EditorError> {
        self.require_editing()?;

        self.draft.content.sort_by_key(|it| it.order);
        let index = self
            .draft
            .content
            .iter()
            .position(|it| it.id == id)
            .ok_or(EditorError::ContentNotFound(id))?;

        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|it| *it < self.draft.content.len()),
        };
        if let Some(target) = target {
            self.draft.content.swap(index, target);
        }
        self.renumber();

        Ok(())
    }

    fn content_mut(&mut self, id: Uuid) -> Result<&mut MissionContent, EditorError> {
        self.require_editing()?;
        self.draft
            .content
            .iter_mut()
            .find(|it| it.id == id)
            .ok_or(EditorError::ContentNotFound(id))
    }

    fn require_editing(&self) -> Result<(), EditorError> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(EditorError::NotEditing)
        }
    }

    // Keeps order a dense 1..=N sequence matching the vector position.
    fn renumber(&mut self) {
        for (index, content) in self.draft.content.iter_mut().enumerate() {
            content.order = index as u32 + 1;
        }
    }
}
