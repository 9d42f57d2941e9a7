pub mod config;
pub mod dialogue;
pub mod error;
pub mod grounding;
pub mod professional;
pub mod secret;

// Re-export common types
pub use dialogue::{Turn, TurnRole};
pub use error::{Result, VidhiError};
pub use grounding::{Coordinates, GroundingResult, MapResult, WebResult};
pub use professional::{
    InMemoryDirectory, Professional, ProfessionalDirectory, ProfessionalDraft, Tier,
};
