use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{EdumonCollection, EvolveError, PetError, PetSelector};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session {0} doesn't exist.")]
    NotFound(Uuid),
    #[error(transparent)]
    Pet(#[from] PetError),
    #[error(transparent)]
    Evolve(#[from] EvolveError),
}

/// A student's pet choice and edumon collection between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentSession {
    pub id: Uuid,
    pub pets: PetSelector,
    pub edumon: EdumonCollection,
    pub started: DateTime<Utc>,
}

impl Default for StudentSession {
    fn default() -> Self {
        StudentSession::new()
    }
}

impl StudentSession {
    pub fn new() -> StudentSession {
        StudentSession {
            id: Uuid::new_v4(),
            pets: PetSelector::new(),
            edumon: EdumonCollection::starter(),
            started: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sessions_start_fresh() {
        let session = StudentSession::new();

        assert!(session.pets.selected().is_none());
        assert!(session.pets.confirmed().is_none());
        assert_eq!(session.edumon, EdumonCollection::starter());
    }

    #[test]
    fn domain_errors_convert() {
        assert_eq!(
            SessionError::from(PetError::NothingSelected),
            SessionError::Pet(PetError::NothingSelected)
        );
        assert_eq!(
            SessionError::from(EvolveError::FinalStage).to_string(),
            "Already at the final stage."
        );
    }
}
