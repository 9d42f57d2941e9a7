//! Orchestration layer for the Vidhi assistant.
//!
//! Ties the partner directory and the generative backend together into
//! the three user-facing flows: advice conversations, document
//! simplification, and the grounded professional finder.

pub mod advisor;
pub mod aggregator;
pub mod assistant;

#[cfg(test)]
pub(crate) mod testing;

pub use advisor::AdvisorSession;
pub use aggregator::{FinderOutcome, GroundingAggregator, NO_DETAILS_FALLBACK};
pub use assistant::{LegalAssistant, NOTHING_TO_PROCESS};
