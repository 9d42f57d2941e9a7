//! Registered professional records and the partner directory.

pub mod directory;
pub mod model;

pub use directory::{InMemoryDirectory, ProfessionalDirectory};
pub use model::{Professional, ProfessionalDraft, Tier};
