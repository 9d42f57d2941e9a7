//! Grounded finder flow.
//!
//! Merges the locally registered partner directory with live grounded
//! place results. The two halves stay separate result groups: local
//! matches are tier-ranked, grounded places keep the backend's order.

use std::sync::Arc;

use tracing::warn;

use vidhi_core::error::VidhiError;
use vidhi_core::grounding::{Coordinates, MapResult};
use vidhi_core::{Professional, ProfessionalDirectory};
use vidhi_interaction::{GenerativeBackend, ModelRouter, RequestPart, TaskKind};

/// Narrative fallback when the grounded reply has no text.
pub const NO_DETAILS_FALLBACK: &str = "No specific details found.";

/// Result of one finder query.
#[derive(Debug, Clone)]
pub struct FinderOutcome {
    /// The backend's narrative answer, verbatim.
    pub narrative: String,
    /// Tier-ranked directory matches.
    pub local_matches: Vec<Professional>,
    /// Map-backed places in the backend's own ranking order.
    pub grounded_places: Vec<MapResult>,
    /// Set when the grounded half of the search failed; local matches
    /// are still valid.
    pub warning: Option<VidhiError>,
}

/// Reconciles directory search with location-grounded backend results.
pub struct GroundingAggregator {
    directory: Arc<dyn ProfessionalDirectory>,
    backend: Arc<dyn GenerativeBackend>,
    router: ModelRouter,
}

impl GroundingAggregator {
    pub fn new(
        directory: Arc<dyn ProfessionalDirectory>,
        backend: Arc<dyn GenerativeBackend>,
        router: ModelRouter,
    ) -> Self {
        Self {
            directory,
            backend,
            router,
        }
    }

    /// Runs the finder flow for `query`, optionally biased toward
    /// `coordinates`.
    ///
    /// An empty query returns the full tier-ranked directory as local
    /// matches (the featured display case). A failing grounding call
    /// never suppresses local matches; it is recorded in the outcome's
    /// `warning` instead.
    pub async fn resolve(
        &self,
        query: &str,
        coordinates: Option<Coordinates>,
    ) -> FinderOutcome {
        let local_matches = self.directory.search(query).await;

        let route = self.router.route(TaskKind::LocationGrounding { bias: coordinates });
        let request = route.request(Vec::new(), vec![RequestPart::Text(finder_prompt(query))]);

        match self.backend.generate(request).await {
            Ok(reply) => {
                let narrative = if reply.text.is_empty() {
                    NO_DETAILS_FALLBACK.to_string()
                } else {
                    reply.text
                };
                // Keep map-backed chunks in backend order; web and
                // unclassifiable chunks are dropped.
                let grounded_places = reply
                    .grounding
                    .into_iter()
                    .filter_map(|chunk| chunk.into_map())
                    .collect();
                FinderOutcome {
                    narrative,
                    local_matches,
                    grounded_places,
                    warning: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "grounded search failed, returning local matches only");
                FinderOutcome {
                    narrative: NO_DETAILS_FALLBACK.to_string(),
                    local_matches,
                    grounded_places: Vec::new(),
                    warning: Some(err),
                }
            }
        }
    }
}

fn finder_prompt(query: &str) -> String {
    format!(
        "Find civil rights advocates, lawyers, or legal aid clinics in India near the \
         location for this issue: \"{query}\". \n\
         Provide a list of highly-rated firms or advocates. Focus on trustworthy and \
         accessible representation."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use vidhi_core::grounding::{GroundingResult, WebResult};
    use vidhi_core::{InMemoryDirectory, ProfessionalDraft, Tier};
    use vidhi_interaction::BackendReply;

    fn aggregator(backend: Arc<MockBackend>) -> GroundingAggregator {
        GroundingAggregator::new(
            Arc::new(InMemoryDirectory::with_demo_partners()),
            backend,
            ModelRouter::new(),
        )
    }

    fn map(uri: &str, title: &str) -> MapResult {
        MapResult {
            uri: uri.to_string(),
            title: title.to_string(),
            review_snippets: vec![],
        }
    }

    #[tokio::test]
    async fn keeps_backend_order_and_drops_non_map_chunks() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(BackendReply {
            text: "Two clinics nearby.".to_string(),
            grounding: vec![
                GroundingResult::Map(map("https://maps.example/b", "B Clinic")),
                GroundingResult::Web(WebResult {
                    uri: "https://example.com".to_string(),
                    title: "Article".to_string(),
                }),
                GroundingResult::Unknown,
                GroundingResult::Map(map("https://maps.example/a", "A Clinic")),
            ],
        });

        let outcome = aggregator(backend).resolve("tenant rights", None).await;
        assert_eq!(outcome.narrative, "Two clinics nearby.");
        let titles: Vec<&str> = outcome
            .grounded_places
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B Clinic", "A Clinic"]);
        assert!(outcome.warning.is_none());
    }

    #[tokio::test]
    async fn empty_query_returns_featured_directory() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(BackendReply::default());

        let outcome = aggregator(backend).resolve("", None).await;
        assert_eq!(outcome.local_matches.len(), 3);
        // Tier-ranked: the two Elite partners first.
        assert_eq!(outcome.local_matches[0].tier, Tier::Elite);
        assert_eq!(outcome.local_matches[1].tier, Tier::Elite);
        assert_eq!(outcome.narrative, NO_DETAILS_FALLBACK);
    }

    #[tokio::test]
    async fn grounding_failure_preserves_local_matches() {
        let backend = Arc::new(MockBackend::new());
        backend.push_err(VidhiError::backend("upstream down", true));

        let directory = Arc::new(InMemoryDirectory::new());
        directory
            .register(ProfessionalDraft {
                name: "Adv. Pune Tenant Expert".to_string(),
                firm_name: "Deccan Legal".to_string(),
                location: "Pune".to_string(),
                practice_areas: vec!["Tenant Rights".to_string()],
                bio: String::new(),
                years_of_experience: 6,
                tier: Tier::Pro,
                email: "pune@example.com".to_string(),
                phone: "+91 11111 11111".to_string(),
                image_url: None,
            })
            .await;

        let aggregator =
            GroundingAggregator::new(directory, backend, ModelRouter::new());
        let outcome = aggregator.resolve("Pune", None).await;

        assert!(!outcome.local_matches.is_empty());
        assert!(outcome.grounded_places.is_empty());
        assert_eq!(outcome.narrative, NO_DETAILS_FALLBACK);
        assert!(matches!(
            outcome.warning,
            Some(VidhiError::BackendUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn coordinates_flow_into_the_grounding_request() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(BackendReply::default());

        let coords = Coordinates {
            latitude: 18.52,
            longitude: 73.86,
        };
        aggregator(backend.clone())
            .resolve("tenant dispute in Pune", Some(coords))
            .await;

        let requests = backend.requests();
        assert!(requests[0].tools.location_search);
        assert_eq!(requests[0].tools.spatial_bias, Some(coords));
        match &requests[0].parts[0] {
            RequestPart::Text(prompt) => {
                assert!(prompt.contains("tenant dispute in Pune"))
            }
            other => panic!("unexpected part: {other:?}"),
        }
    }
}
