//! Frontend screens and the URL paths the single-page app serves them on.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,

    // Teacher
    Dashboard,
    ClassroomDetails(String),
    CreateClass,
    Students,
    Profile,
    UploadDocument(String),

    // Student
    Onboarding,
    PetSelector,
    EnterCode,
    LevelMap,
    QuestDetail,
    Quiz,
    Edumon,
}

impl Screen {
    pub fn path(&self) -> String {
        match self {
            Screen::Login => "/login".to_string(),
            Screen::Dashboard => "/dashboard".to_string(),
            Screen::ClassroomDetails(id) => format!("/classroom/{}", id),
            Screen::CreateClass => "/create-class".to_string(),
            Screen::Students => "/students".to_string(),
            Screen::Profile => "/profile".to_string(),
            Screen::UploadDocument(id) => format!("/upload-document/{}", id),
            Screen::Onboarding => "/onboarding".to_string(),
            Screen::PetSelector => "/pet-selector".to_string(),
            Screen::EnterCode => "/enter-code".to_string(),
            Screen::LevelMap => "/level-map".to_string(),
            Screen::QuestDetail => "/quest-detail".to_string(),
            Screen::Quiz => "/quiz".to_string(),
            Screen::Edumon => "/Edu".to_string(),
        }
    }

    /// Resolves a frontend path. `/` redirects to the login screen.
    pub fn from_path(path: &str) -> Option<Screen> {
        let path = path.trim_end_matches('/');

        if let Some(id) = path.strip_prefix("/classroom/") {
            return single_segment(id).map(Screen::ClassroomDetails);
        }
        if let Some(id) = path.strip_prefix("/upload-document/") {
            return single_segment(id).map(Screen::UploadDocument);
        }

        let screen = match path {
            "" | "/login" => Screen::Login,
            "/dashboard" => Screen::Dashboard,
            "/create-class" => Screen::CreateClass,
            "/students" => Screen::Students,
            "/profile" => Screen::Profile,
            "/onboarding" => Screen::Onboarding,
            "/pet-selector" => Screen::PetSelector,
            "/enter-code" => Screen::EnterCode,
            "/level-map" | "/levelmap" => Screen::LevelMap,
            "/quest-detail" => Screen::QuestDetail,
            "/quiz" => Screen::Quiz,
            "/Edu" => Screen::Edumon,
            _ => return None,
        };
        Some(screen)
    }
}

fn single_segment(value: &str) -> Option<String> {
    if value.is_empty() || value.contains('/') {
        None
    } else {
        Some(value.to_string())
    }
}

impl Serialize for Screen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_to_login() {
        assert_eq!(Screen::from_path("/"), Some(Screen::Login));
    }

    #[test]
    fn level_map_has_two_paths() {
        assert_eq!(Screen::from_path("/levelmap"), Some(Screen::LevelMap));
        assert_eq!(Screen::from_path("/level-map"), Some(Screen::LevelMap));
        assert_eq!(Screen::LevelMap.path(), "/level-map");
    }

    #[test]
    fn parameterized_screens_round_trip() {
        let screen = Screen::from_path("/classroom/42").unwrap();
        assert_eq!(screen, Screen::ClassroomDetails("42".to_string()));
        assert_eq!(screen.path(), "/classroom/42");
        assert_eq!(Screen::from_path("/classroom/42/extra"), None);
    }

    #[test]
    fn screens_serialize_as_paths() {
        let json = serde_json::to_string(&Screen::Dashboard).unwrap();
        assert_eq!(json, "\"/dashboard\"");
    }
}
