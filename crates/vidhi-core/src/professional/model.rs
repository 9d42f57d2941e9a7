//! Professional record types for the partner directory.

use serde::{Deserialize, Serialize};

/// Subscription tier of a registered professional.
///
/// The derived ordering (`Free < Pro < Elite`) is the total order used for
/// every directory ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Free,
    Pro,
    Elite,
}

/// A registered legal professional.
///
/// `id` is assigned at registration and never changes; records are neither
/// mutated nor deleted once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub firm_name: String,
    pub location: String,
    pub practice_areas: Vec<String>,
    pub bio: String,
    pub years_of_experience: u32,
    /// Average rating in `[0, 5]`.
    pub rating: f32,
    pub review_count: u32,
    pub tier: Tier,
    pub email: String,
    pub phone: String,
    pub image_url: Option<String>,
}

impl Professional {
    /// Case-insensitive OR-match over name, firm name, practice areas,
    /// and location.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.firm_name.to_lowercase().contains(&needle)
            || self
                .practice_areas
                .iter()
                .any(|area| area.to_lowercase().contains(&needle))
            || self.location.to_lowercase().contains(&needle)
    }
}

/// Registration input for a new professional.
///
/// `id`, `rating`, and `review_count` are supplied by the directory at
/// registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalDraft {
    pub name: String,
    pub firm_name: String,
    pub location: String,
    pub practice_areas: Vec<String>,
    pub bio: String,
    pub years_of_experience: u32,
    pub tier: Tier,
    pub email: String,
    pub phone: String,
    pub image_url: Option<String>,
}
