pub mod classroom;
pub mod mission;
pub mod store;
pub mod student;
