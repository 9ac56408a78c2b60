use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::mission::Mission;

pub mod draft;

pub use draft::{ClassroomDraft, ClassroomFieldsUpdate, DraftError};

pub const MIN_STUDENTS: u8 = 1;
pub const MAX_STUDENTS: u8 = 100;
pub const DEFAULT_STUDENTS: u8 = 25;
pub const DEFAULT_ACADEMIC_YEAR: &str = "2024-2025";

pub static SUBJECTS: &[&str] = &[
    "Mathematics",
    "Science",
    "English",
    "History",
    "Geography",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "Art",
    "Music",
    "Physical Education",
];

pub static GRADE_LEVELS: &[&str] = &[
    "Kindergarten",
    "Grade 1",
    "Grade 2",
    "Grade 3",
    "Grade 4",
    "Grade 5",
    "Grade 6",
    "Grade 7",
    "Grade 8",
    "Grade 9",
    "Grade 10",
    "Grade 11",
    "Grade 12",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Background {
    pub id: u8,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub gradient: &'static str,
    #[schema(value_type = String)]
    pub preview: &'static str,
}

pub static BACKGROUNDS: [Background; 8] = [
    Background {
        id: 0,
        name: "Ocean Blue",
        gradient: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        preview: "#667eea",
    },
    Background {
        id: 1,
        name: "Sunset Orange",
        gradient: "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
        preview: "#f093fb",
    },
    Background {
        id: 2,
        name: "Forest Green",
        gradient: "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
        preview: "#4facfe",
    },
    Background {
        id: 3,
        name: "Purple Dreams",
        gradient: "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
        preview: "#a8edea",
    },
    Background {
        id: 4,
        name: "Warm Coral",
        gradient: "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
        preview: "#ff9a9e",
    },
    Background {
        id: 5,
        name: "Sky Blue",
        gradient: "linear-gradient(135deg, #a1c4fd 0%, #c2e9fb 100%)",
        preview: "#a1c4fd",
    },
    Background {
        id: 6,
        name: "Golden Hour",
        gradient: "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
        preview: "#ffecd2",
    },
    Background {
        id: 7,
        name: "Mint Fresh",
        gradient: "linear-gradient(135deg, #a8e6cf 0%, #dcedc1 100%)",
        preview: "#a8e6cf",
    },
];

impl Background {
    pub fn by_id(id: u8) -> Option<&'static Background> {
        BACKGROUNDS.iter().find(|it| it.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassVisibility {
    /// Anyone can find and join.
    Public,
    /// Joining needs an invitation or approval.
    Restricted,
    /// Only invited students.
    Private,
}

impl Default for ClassVisibility {
    fn default() -> Self {
        ClassVisibility::Public
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassOptions {
    pub notifications: bool,
    pub allow_student_invites: bool,
    pub auto_accept_students: bool,
}

impl Default for ClassOptions {
    fn default() -> Self {
        ClassOptions {
            notifications: true,
            allow_student_invites: false,
            auto_accept_students: true,
        }
    }
}

/// Everything the class catalog endpoints hand to the create-class form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassCatalog {
    #[schema(value_type = Vec<String>)]
    pub subjects: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub grade_levels: &'static [&'static str],
    #[schema(value_type = Vec<Background>)]
    pub backgrounds: &'static [Background],
    pub min_students: u8,
    pub max_students: u8,
}

impl Default for ClassCatalog {
    fn default() -> Self {
        ClassCatalog {
            subjects: SUBJECTS,
            grade_levels: GRADE_LEVELS,
            backgrounds: &BACKGROUNDS,
            min_students: MIN_STUDENTS,
            max_students: MAX_STUDENTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Classroom {
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub background: Background,
    pub student_count: u8,
    pub class_type: ClassVisibility,
    pub grade_level: String,
    pub academic_year: String,
    pub class_schedule: String,
    pub class_location: String,
    pub class_tags: String,
    pub options: ClassOptions,
    pub missions: Vec<Mission>,
    pub created_at: DateTime<Utc>,
}

impl Classroom {
    /// Comma separated `class_tags`, trimmed and without empties.
    pub fn tags(&self) -> Vec<&str> {
        self.class_tags
            .split(',')
            .map(str::trim)
            .filter(|it| !it.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_ids_match_positions() {
        for (index, background) in BACKGROUNDS.iter().enumerate() {
            assert_eq!(background.id as usize, index);
        }
        assert!(Background::by_id(8).is_none());
    }

    #[test]
    fn visibility_defaults_to_public() {
        assert_eq!(ClassVisibility::default(), ClassVisibility::Public);
        let parsed: ClassVisibility = serde_json::from_str("\"restricted\"").unwrap();
        assert_eq!(parsed, ClassVisibility::Restricted);
    }
}
