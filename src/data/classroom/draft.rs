use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    Background, ClassOptions, ClassVisibility, Classroom, DEFAULT_ACADEMIC_YEAR,
    DEFAULT_STUDENTS, MAX_STUDENTS, MIN_STUDENTS,
};
use crate::data::mission::{EditorError, MissionEditor};
use crate::util::non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Class name is required.")]
    MissingName,
    #[error("Subject is required.")]
    MissingSubject,
    #[error("Background {0} doesn't exist.")]
    UnknownBackground(u8),
    #[error("Draft {0} doesn't exist.")]
    NotFound(Uuid),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Form fields of a classroom before it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassroomFields {
    pub name: String,
    pub subject: String,
    pub description: String,
    pub background_id: u8,
    pub student_count: u8,
    pub class_type: ClassVisibility,
    pub grade_level: String,
    pub academic_year: String,
    pub class_schedule: String,
    pub class_location: String,
    pub class_tags: String,
    pub options: ClassOptions,
}

impl Default for ClassroomFields {
    fn default() -> Self {
        ClassroomFields {
            name: String::new(),
            subject: String::new(),
            description: String::new(),
            background_id: 0,
            student_count: DEFAULT_STUDENTS,
            class_type: ClassVisibility::default(),
            grade_level: String::new(),
            academic_year: DEFAULT_ACADEMIC_YEAR.to_string(),
            class_schedule: String::new(),
            class_location: String::new(),
            class_tags: String::new(),
            options: ClassOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassroomFieldsUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub background_id: Option<u8>,
    #[serde(default)]
    pub student_count: Option<u8>,
    #[serde(default)]
    pub class_type: Option<ClassVisibility>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub class_schedule: Option<String>,
    #[serde(default)]
    pub class_location: Option<String>,
    #[serde(default)]
    pub class_tags: Option<String>,
    #[serde(default)]
    pub options: Option<ClassOptions>,
}

/// A classroom being put together, along with its missions.
#[derive(Debug, Clone, Serialize)]
pub struct ClassroomDraft {
    pub id: Uuid,
    pub fields: ClassroomFields,
    pub editor: MissionEditor,
    pub started: DateTime<Utc>,
}

impl Default for ClassroomDraft {
    fn default() -> Self {
        ClassroomDraft::new()
    }
}

impl ClassroomDraft {
    pub fn new() -> ClassroomDraft {
        ClassroomDraft {
            id: Uuid::new_v4(),
            fields: ClassroomFields::default(),
            editor: MissionEditor::new(),
            started: Utc::now(),
        }
    }

    /// Merges present fields. The background must exist and the student
    /// count is clamped to the allowed range.
    pub fn update(&mut self, update: ClassroomFieldsUpdate) -> Result<(), DraftError> {
        if let Some(id) = update.background_id {
            if Background::by_id(id).is_none() {
                return Err(DraftError::UnknownBackground(id));
            }
        }

        let fields = &mut self.fields;
        if let Some(name) = update.name {
            fields.name = name;
        }
        if let Some(subject) = update.subject {
            fields.subject = subject;
        }
        if let Some(description) = update.description {
            fields.description = description;
        }
        if let Some(id) = update.background_id {
            fields.background_id = id;
        }
        if let Some(count) = update.student_count {
            fields.student_count = count.max(MIN_STUDENTS).min(MAX_STUDENTS);
        }
        if let Some(class_type) = update.class_type {
            fields.class_type = class_type;
        }
        if let Some(grade_level) = update.grade_level {
            fields.grade_level = grade_level;
        }
        if let Some(academic_year) = update.academic_year {
            fields.academic_year = academic_year;
        }
        if let Some(schedule) = update.class_schedule {
            fields.class_schedule = schedule;
        }
        if let Some(location) = update.class_location {
            fields.class_location = location;
        }
        if let Some(tags) = update.class_tags {
            fields.class_tags = tags;
        }
        if let Some(options) = update.options {
            fields.options = options;
        }
        Ok(())
    }

    pub fn increment_students(&mut self) -> u8 {
        self.fields.student_count = (self.fields.student_count + 1).min(MAX_STUDENTS);
        self.fields.student_count
    }

    pub fn decrement_students(&mut self) -> u8 {
        self.fields.student_count = self
            .fields
            .student_count
            .saturating_sub(1)
            .max(MIN_STUDENTS);
        self.fields.student_count
    }

    pub fn submit(&self) -> Result<Classroom, DraftError> {
        self.submit_at(Utc::now())
    }

    /// Builds the classroom from the fields and the saved missions.
    ///
    /// A mission still open in the editor is not part of the result.
    pub fn submit_at(&self, now: DateTime<Utc>) -> Result<Classroom, DraftError> {
        let fields = &self.fields;
        let name = non_blank(&fields.name).ok_or(DraftError::MissingName)?;
        let subject = non_blank(&fields.subject).ok_or(DraftError::MissingSubject)?;
        let background = *Background::by_id(fields.background_id)
            .ok_or(DraftError::UnknownBackground(fields.background_id))?;

        if self.editor.is_editing() {
            tracing::debug!(draft = %self.id, "submitting with an unsaved mission draft");
        }

        Ok(Classroom {
            id: Uuid::now_v7(),
            title: name.to_string(),
            subject: subject.to_string(),
            description: fields.description.clone(),
            background,
            student_count: fields.student_count,
            class_type: fields.class_type,
            grade_level: fields.grade_level.clone(),
            academic_year: fields.academic_year.clone(),
            class_schedule: fields.class_schedule.clone(),
            class_location: fields.class_location.clone(),
            class_tags: fields.class_tags.clone(),
            options: fields.options,
            missions: self.editor.missions().to_vec(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mission::MissionDraftUpdate;

    fn named(name: &str, subject: &str) -> ClassroomDraft {
        let mut draft = ClassroomDraft::new();
        draft
            .update(ClassroomFieldsUpdate {
                name: Some(name.to_string()),
                subject: Some(subject.to_string()),
                ..Default::default()
            })
            .unwrap();
        draft
    }

    #[test]
    fn new_draft_uses_form_defaults() {
        let draft = ClassroomDraft::new();
        assert_eq!(draft.fields.student_count, 25);
        assert_eq!(draft.fields.academic_year, "2024-2025");
        assert_eq!(draft.fields.class_type, ClassVisibility::Public);
        assert!(draft.fields.options.notifications);
        assert!(!draft.fields.options.allow_student_invites);
        assert!(draft.fields.options.auto_accept_students);
    }

    #[test]
    fn name_and_subject_are_required() {
        assert_eq!(named("  ", "Art").submit(), Err(DraftError::MissingName));
        assert_eq!(named("Art 101", "").submit(), Err(DraftError::MissingSubject));
    }

    #[test]
    fn unknown_background_is_rejected() {
        let mut draft = ClassroomDraft::new();
        let result = draft.update(ClassroomFieldsUpdate {
            background_id: Some(42),
            name: Some("ignored".to_string()),
            ..Default::default()
        });

        assert_eq!(result, Err(DraftError::UnknownBackground(42)));
        assert_eq!(draft.fields.name, "");
    }

    #[test]
    fn student_count_is_clamped() {
        let mut draft = ClassroomDraft::new();
        draft
            .update(ClassroomFieldsUpdate {
                student_count: Some(0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(draft.fields.student_count, 1);
        assert_eq!(draft.decrement_students(), 1);

        draft
            .update(ClassroomFieldsUpdate {
                student_count: Some(250),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(draft.fields.student_count, 100);
        assert_eq!(draft.increment_students(), 100);
        assert_eq!(draft.decrement_students(), 99);
    }

    #[test]
    fn submit_carries_saved_missions_only() {
        let mut draft = named("Biology 9A", "Biology");
        draft.editor.create();
        draft
            .editor
            .update_draft(MissionDraftUpdate {
                title: Some("Cells".to_string()),
                ..Default::default()
            })
            .unwrap();
        draft.editor.save().unwrap();

        draft.editor.create();
        draft
            .editor
            .update_draft(MissionDraftUpdate {
                title: Some("Unsaved".to_string()),
                ..Default::default()
            })
            .unwrap();

        let classroom = draft.submit().unwrap();

        assert_eq!(classroom.title, "Biology 9A");
        assert_eq!(classroom.missions, draft.editor.missions().to_vec());
        assert_eq!(classroom.missions.len(), 1);
        assert_eq!(classroom.background.name, "Ocean Blue");
    }

    #[test]
    fn tags_split_on_commas() {
        let mut draft = named("Chem", "Chemistry");
        draft
            .update(ClassroomFieldsUpdate {
                class_tags: Some("lab, , safety ,acids".to_string()),
                ..Default::default()
            })
            .unwrap();

        let classroom = draft.submit().unwrap();
        assert_eq!(classroom.tags(), vec!["lab", "safety", "acids"]);
    }
}
