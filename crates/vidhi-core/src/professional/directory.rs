//! Partner directory repository.
//!
//! The directory is the locally registered half of the finder flow; the
//! other half comes from grounded backend results and is merged by the
//! application layer.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::professional::{Professional, ProfessionalDraft, Tier};

/// Repository of registered legal professionals.
///
/// All operations are infallible: registration enforces no uniqueness or
/// validation constraints, and listing/search over the in-memory store
/// cannot fail.
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    /// Registers a new professional, assigning a fresh id and seeding the
    /// rating fields, and returns the stored record.
    async fn register(&self, draft: ProfessionalDraft) -> Professional;

    /// Returns every registered professional ordered by tier descending
    /// (Elite, Pro, Free). Entries of equal tier keep their registration
    /// order.
    async fn list(&self) -> Vec<Professional>;

    /// Returns the tier-ordered subset matching `query` case-insensitively
    /// across name, firm name, practice areas, and location. An empty
    /// query is equivalent to [`list`](Self::list).
    async fn search(&self, query: &str) -> Vec<Professional>;
}

/// In-memory [`ProfessionalDirectory`] backed by an append-only vector.
///
/// The `RwLock` keeps appends serialized when the directory is shared
/// across tasks or threads.
#[derive(Default)]
pub struct InMemoryDirectory {
    records: Arc<RwLock<Vec<Professional>>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with the demo partner profiles.
    pub fn with_demo_partners() -> Self {
        let directory = Self::new();
        {
            let mut records = directory
                .records
                .try_write()
                .expect("freshly created lock is uncontended");
            records.extend(demo_partners());
        }
        directory
    }
}

#[async_trait]
impl ProfessionalDirectory for InMemoryDirectory {
    async fn register(&self, draft: ProfessionalDraft) -> Professional {
        let professional = Professional {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            firm_name: draft.firm_name,
            location: draft.location,
            practice_areas: draft.practice_areas,
            bio: draft.bio,
            years_of_experience: draft.years_of_experience,
            // New profiles start at a full rating with no reviews yet.
            rating: 5.0,
            review_count: 0,
            tier: draft.tier,
            email: draft.email,
            phone: draft.phone,
            image_url: draft.image_url,
        };

        let mut records = self.records.write().await;
        records.push(professional.clone());
        professional
    }

    async fn list(&self) -> Vec<Professional> {
        let records = self.records.read().await;
        let mut ranked = records.clone();
        // sort_by_key is stable, so insertion order survives within a tier.
        ranked.sort_by_key(|p| Reverse(p.tier));
        ranked
    }

    async fn search(&self, query: &str) -> Vec<Professional> {
        let ranked = self.list().await;
        if query.is_empty() {
            return ranked;
        }
        ranked.into_iter().filter(|p| p.matches(query)).collect()
    }
}

fn demo_partners() -> Vec<Professional> {
    vec![
        Professional {
            id: "l1".to_string(),
            name: "Adv. Rajesh Kumar".to_string(),
            firm_name: "Kumar & Associates".to_string(),
            location: "New Delhi".to_string(),
            practice_areas: vec![
                "Civil Rights".to_string(),
                "Constitutional Law".to_string(),
            ],
            bio: "Senior Advocate with 15+ years of experience in High Court litigations \
                  specializing in fundamental rights."
                .to_string(),
            years_of_experience: 18,
            rating: 4.9,
            review_count: 124,
            tier: Tier::Elite,
            email: "contact@kumarlegal.in".to_string(),
            phone: "+91 98765 43210".to_string(),
            image_url: Some(
                "https://ui-avatars.com/api/?name=Rajesh+Kumar&background=C5A059&color=fff"
                    .to_string(),
            ),
        },
        Professional {
            id: "l2".to_string(),
            name: "Adv. Priya Sharma".to_string(),
            firm_name: "Sharma Legal Solutions".to_string(),
            location: "Mumbai".to_string(),
            practice_areas: vec!["Tenant Rights".to_string(), "Family Law".to_string()],
            bio: "Dedicated to providing affordable legal aid and tenant dispute resolution."
                .to_string(),
            years_of_experience: 8,
            rating: 4.7,
            review_count: 89,
            tier: Tier::Pro,
            email: "office@sharmalegal.com".to_string(),
            phone: "+91 98765 12345".to_string(),
            image_url: Some(
                "https://ui-avatars.com/api/?name=Priya+Sharma&background=1C1917&color=fff"
                    .to_string(),
            ),
        },
        Professional {
            id: "l3".to_string(),
            name: "Adv. Vikram Singh".to_string(),
            firm_name: "Singh & Partners".to_string(),
            location: "Bangalore".to_string(),
            practice_areas: vec!["Criminal Defense".to_string(), "Human Rights".to_string()],
            bio: "Fighting for justice and fair trial rights for over a decade.".to_string(),
            years_of_experience: 12,
            rating: 4.8,
            review_count: 56,
            tier: Tier::Elite,
            email: "vikram@singhpartners.com".to_string(),
            phone: "+91 98765 67890".to_string(),
            image_url: Some(
                "https://ui-avatars.com/api/?name=Vikram+Singh&background=C5A059&color=fff"
                    .to_string(),
            ),
        },
    ]
}
