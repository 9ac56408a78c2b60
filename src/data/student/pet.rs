use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pet {
    pub id: u8,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[schema(value_type = String)]
    pub color: &'static str,
    #[schema(value_type = String)]
    pub element: &'static str,
}

pub static PETS: [Pet; 6] = [
    Pet {
        id: 1,
        name: "Blaze",
        kind: "Fire Fox",
        color: "bg-orange-500",
        element: "🔥",
    },
    Pet {
        id: 2,
        name: "Splash",
        kind: "Water Otter",
        color: "bg-blue-500",
        element: "💧",
    },
    Pet {
        id: 3,
        name: "Leaf",
        kind: "Grass Rabbit",
        color: "bg-green-500",
        element: "🌿",
    },
    Pet {
        id: 4,
        name: "Spark",
        kind: "Electric Mouse",
        color: "bg-yellow-500",
        element: "⚡",
    },
    Pet {
        id: 5,
        name: "Rocky",
        kind: "Stone Turtle",
        color: "bg-gray-500",
        element: "🪨",
    },
    Pet {
        id: 6,
        name: "Twinkle",
        kind: "Fairy Cat",
        color: "bg-purple-500",
        element: "✨",
    },
];

impl Pet {
    pub fn by_id(id: u8) -> Option<&'static Pet> {
        PETS.iter().find(|it| it.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    #[error("Pet {0} doesn't exist.")]
    UnknownPet(u8),
    #[error("Pick a pet first.")]
    NothingSelected,
    #[error("Confirm a pet before continuing.")]
    NotConfirmed,
}

/// Choosing a starter pet: select, then confirm or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PetSelector {
    #[schema(value_type = Option<Pet>)]
    selected: Option<&'static Pet>,
    #[schema(value_type = Option<Pet>)]
    confirmed: Option<&'static Pet>,
    confirming: bool,
    celebrating: bool,
}

impl PetSelector {
    pub fn new() -> PetSelector {
        PetSelector::default()
    }

    pub fn selected(&self) -> Option<&'static Pet> {
        self.selected
    }

    pub fn confirmed(&self) -> Option<&'static Pet> {
        self.confirmed
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn select(&mut self, id: u8) -> Result<&'static Pet, PetError> {
        let pet = Pet::by_id(id).ok_or(PetError::UnknownPet(id))?;
        self.selected = Some(pet);
        self.confirming = true;
        Ok(pet)
    }

    pub fn confirm(&mut self) -> Result<&'static Pet, PetError> {
        let pet = self.selected.ok_or(PetError::NothingSelected)?;
        self.confirmed = Some(pet);
        self.confirming = false;
        self.celebrating = true;
        tracing::debug!(pet = pet.name, "confirmed pet");
        Ok(pet)
    }

    pub fn cancel(&mut self) {
        self.selected = None;
        self.confirming = false;
    }

    /// The celebration overlay is dismissed on its own after a few seconds.
    pub fn end_celebration(&mut self) {
        self.celebrating = false;
    }

    pub fn continue_journey(&self) -> Result<Screen, PetError> {
        self.confirmed
            .map(|_| Screen::EnterCode)
            .ok_or(PetError::NotConfirmed)
    }

    pub fn back(&self) -> Screen {
        Screen::Onboarding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_requires_a_selection() {
        let mut selector = PetSelector::new();
        assert_eq!(selector.confirm(), Err(PetError::NothingSelected));
        assert_eq!(selector.select(9), Err(PetError::UnknownPet(9)));
    }

    #[test]
    fn select_confirm_and_continue() {
        let mut selector = PetSelector::new();
        let pet = selector.select(3).unwrap();
        assert_eq!(pet.name, "Leaf");
        assert!(selector.is_confirming());

        selector.confirm().unwrap();
        assert!(!selector.is_confirming());
        assert!(selector.is_celebrating());
        assert_eq!(selector.confirmed().map(|it| it.id), Some(3));
        assert_eq!(selector.continue_journey(), Ok(Screen::EnterCode));

        selector.end_celebration();
        assert!(!selector.is_celebrating());
    }

    #[test]
    fn cancel_clears_the_selection_only() {
        let mut selector = PetSelector::new();
        selector.select(1).unwrap();
        selector.confirm().unwrap();
        selector.select(2).unwrap();

        selector.cancel();

        assert!(selector.selected().is_none());
        assert_eq!(selector.confirmed().map(|it| it.name), Some("Blaze"));
    }

    #[test]
    fn cannot_continue_without_a_pet() {
        let selector = PetSelector::new();
        assert_eq!(selector.continue_journey(), Err(PetError::NotConfirmed));
        assert_eq!(selector.back(), Screen::Onboarding);
    }
}
