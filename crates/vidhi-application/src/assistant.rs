//! The collaborator surface exposed to the UI layer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use vidhi_core::config::VidhiConfig;
use vidhi_core::grounding::Coordinates;
use vidhi_core::{Professional, ProfessionalDirectory, ProfessionalDraft, Turn};
use vidhi_interaction::{
    GenerativeBackend, GeolocationProvider, InlineDocument, ModelRouter, PositionRequest,
    RequestPart, TaskKind,
};

use crate::advisor::AdvisorSession;
use crate::aggregator::{FinderOutcome, GroundingAggregator};

/// Returned by `simplify` when neither text nor a document is supplied.
/// No backend call is made in that case.
pub const NOTHING_TO_PROCESS: &str = "Please provide text or a file to simplify.";

/// Prompt substituted when only a document is supplied.
pub const DOCUMENT_ONLY_PROMPT: &str =
    "Please simplify this document and explain the key legal points in plain English.";

/// Returned when the simplifier reply carries no text.
pub const COULD_NOT_SIMPLIFY: &str = "Could not simplify text.";

/// Returned when the simplifier backend call fails outright.
pub const SIMPLIFY_FAILURE: &str = "Error processing request. Please try again.";

/// Facade over the advice, decoder, and finder flows plus the partner
/// directory.
///
/// Every collaborator is injected, so tests wire in fakes. None of the
/// public methods fail for expected failure modes; they resolve to
/// fallback text or to outcomes carrying a warning.
pub struct LegalAssistant {
    backend: Arc<dyn GenerativeBackend>,
    directory: Arc<dyn ProfessionalDirectory>,
    geolocation: Arc<dyn GeolocationProvider>,
    router: ModelRouter,
    position_request: PositionRequest,
    aggregator: GroundingAggregator,
    /// Session for the `advise` surface, created on first use.
    session: Mutex<Option<AdvisorSession>>,
}

impl LegalAssistant {
    /// Creates an assistant with default routing and geolocation
    /// settings.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        directory: Arc<dyn ProfessionalDirectory>,
        geolocation: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self::with_config(backend, directory, geolocation, &VidhiConfig::default())
    }

    /// Creates an assistant applying configured model overrides and
    /// geolocation tunables.
    pub fn with_config(
        backend: Arc<dyn GenerativeBackend>,
        directory: Arc<dyn ProfessionalDirectory>,
        geolocation: Arc<dyn GeolocationProvider>,
        config: &VidhiConfig,
    ) -> Self {
        let router = ModelRouter::with_overrides(&config.models);
        let aggregator =
            GroundingAggregator::new(directory.clone(), backend.clone(), router.clone());
        Self {
            backend,
            directory,
            geolocation,
            position_request: PositionRequest::from(&config.geolocation),
            router,
            aggregator,
            session: Mutex::new(None),
        }
    }

    /// Opens an independent advice session, e.g. for a second
    /// conversation thread.
    pub fn open_session(&self) -> AdvisorSession {
        AdvisorSession::new(self.backend.clone(), &self.router)
    }

    /// Sends one advice message on the assistant's shared session.
    ///
    /// The session is created on the first call, seeded with
    /// `prior_turns`; later calls reuse it and ignore `prior_turns` so
    /// conversational memory accumulates in one place.
    pub async fn advise(&self, user_text: &str, prior_turns: &[Turn]) -> String {
        let mut guard = self.session.lock().await;
        let session = guard.get_or_insert_with(|| {
            AdvisorSession::with_history(
                self.backend.clone(),
                &self.router,
                prior_turns.to_vec(),
            )
        });
        session.advise(user_text).await
    }

    /// Rewrites legal text or an uploaded document in plain language.
    ///
    /// Resolves to fixed fallback strings instead of failing: a missing
    /// input short-circuits locally, and backend failures produce an
    /// apology rather than an error.
    pub async fn simplify(&self, text: &str, document: Option<InlineDocument>) -> String {
        let mut parts = Vec::new();
        if let Some(document) = document {
            parts.push(RequestPart::Inline(document));
        }

        if !text.trim().is_empty() {
            parts.push(RequestPart::Text(text.to_string()));
        } else if !parts.is_empty() {
            parts.push(RequestPart::Text(DOCUMENT_ONLY_PROMPT.to_string()));
        } else {
            return NOTHING_TO_PROCESS.to_string();
        }

        let route = self.router.route(TaskKind::DocumentSummarization);
        match self.backend.generate(route.request(Vec::new(), parts)).await {
            Ok(reply) if reply.text.is_empty() => COULD_NOT_SIMPLIFY.to_string(),
            Ok(reply) => reply.text,
            Err(err) => {
                warn!(error = %err, "simplify call failed");
                SIMPLIFY_FAILURE.to_string()
            }
        }
    }

    /// Runs the finder flow: directory matches plus grounded places.
    pub async fn find_professionals(
        &self,
        query: &str,
        coordinates: Option<Coordinates>,
    ) -> FinderOutcome {
        self.aggregator.resolve(query, coordinates).await
    }

    /// Looks up the current position, downgrading any failure to a
    /// logged warning. The finder then proceeds text-only.
    pub async fn detect_location(&self) -> Option<Coordinates> {
        match self
            .geolocation
            .current_position(self.position_request.clone())
            .await
        {
            Ok(coordinates) => Some(coordinates),
            Err(err) => {
                warn!(error = %err, "geolocation failed, falling back to text-only search");
                None
            }
        }
    }

    /// Registers a professional in the partner directory.
    pub async fn register_professional(&self, draft: ProfessionalDraft) -> Professional {
        self.directory.register(draft).await
    }

    /// Lists all registered professionals, tier-ranked.
    pub async fn list_professionals(&self) -> Vec<Professional> {
        self.directory.list().await
    }

    /// Searches registered professionals; an empty query lists all.
    pub async fn search_professionals(&self, query: &str) -> Vec<Professional> {
        self.directory.search(query).await
    }
}
