use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::screen::Screen;

/// Who is signing in. Decides which part of the frontend they land on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(alias = "teacher")]
    Teacher,
    #[serde(alias = "student")]
    Student,
}

impl Role {
    pub fn landing_screen(self) -> Screen {
        match self {
            Role::Teacher => Screen::Dashboard,
            Role::Student => Screen::Onboarding,
        }
    }
}

impl std::default::Default for Role {
    fn default() -> Self {
        Role::Teacher
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => write!(f, "Teacher"),
            Role::Student => write!(f, "Student"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_roles_are_accepted() {
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"Teacher\"");
    }

    #[test]
    fn roles_land_on_their_own_screens() {
        assert_eq!(Role::Teacher.landing_screen(), Screen::Dashboard);
        assert_eq!(Role::Student.landing_screen(), Screen::Onboarding);
    }
}
