pub mod edumon;
pub mod pet;
pub mod session;

pub use edumon::{EdumonCollection, EvolveError};
pub use pet::{Pet, PetError, PetSelector, PETS};
pub use session::{SessionError, StudentSession};
