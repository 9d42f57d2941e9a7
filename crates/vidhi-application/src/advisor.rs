//! Conversational advice session.

use std::sync::Arc;

use tracing::warn;

use vidhi_core::Turn;
use vidhi_interaction::{
    GenerativeBackend, ModelRoute, ModelRouter, RequestPart, TaskKind,
};

/// Fallback when the backend answers without any text.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "Namaste. I apologize, I couldn't generate a response at this moment.";

/// Shown in place of a model reply when the backend call fails.
pub const BACKEND_FAILURE_APOLOGY: &str =
    "Namaste. I encountered a small issue connecting to the knowledge base. Please ask again.";

/// One advice conversation.
///
/// The session is an explicit handle: callers construct as many
/// independent sessions as they need and thread them through their own
/// state. The turn log is append-only; a failed backend call is recorded
/// as an error-flagged model turn and the session keeps accepting input.
pub struct AdvisorSession {
    backend: Arc<dyn GenerativeBackend>,
    route: ModelRoute,
    turns: Vec<Turn>,
}

impl AdvisorSession {
    /// Starts a fresh session bound to the advisory route.
    pub fn new(backend: Arc<dyn GenerativeBackend>, router: &ModelRouter) -> Self {
        Self::with_history(backend, router, Vec::new())
    }

    /// Starts a session seeded with prior turns, e.g. when the caller
    /// already rendered an opening message.
    pub fn with_history(
        backend: Arc<dyn GenerativeBackend>,
        router: &ModelRouter,
        prior_turns: Vec<Turn>,
    ) -> Self {
        Self {
            backend,
            route: router.route(TaskKind::AdvisoryReasoning),
            turns: prior_turns,
        }
    }

    /// Sends one user message and returns the response text.
    ///
    /// The user turn and the resulting model turn are both appended to
    /// the session, success or failure. This method never fails: backend
    /// errors become an error-flagged turn carrying a fixed apology.
    pub async fn advise(&mut self, user_text: &str) -> String {
        let history = self.turns.clone();
        self.turns.push(Turn::user(user_text));

        let request = self
            .route
            .request(history, vec![RequestPart::Text(user_text.to_string())]);

        match self.backend.generate(request).await {
            Ok(reply) => {
                let text = if reply.text.is_empty() {
                    EMPTY_RESPONSE_FALLBACK.to_string()
                } else {
                    reply.text
                };
                self.turns.push(Turn::model(text.clone()));
                text
            }
            Err(err) => {
                warn!(error = %err, "advice call failed, recording error turn");
                self.turns.push(Turn::model_error(BACKEND_FAILURE_APOLOGY));
                BACKEND_FAILURE_APOLOGY.to_string()
            }
        }
    }

    /// The accumulated conversation, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use vidhi_core::{TurnRole, VidhiError};
    use vidhi_interaction::BackendReply;

    fn reply(text: &str) -> BackendReply {
        BackendReply {
            text: text.to_string(),
            grounding: vec![],
        }
    }

    #[tokio::test]
    async fn two_calls_produce_four_turns_in_order() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(reply("You have the right to..."));
        backend.push_ok(reply("Next, file an FIR."));

        let mut session = AdvisorSession::new(backend.clone(), &ModelRouter::new());
        session.advise("My landlord locked me out").await;
        session.advise("What do I do first?").await;

        let roles: Vec<TurnRole> = session.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::User,
                TurnRole::Model,
                TurnRole::User,
                TurnRole::Model
            ]
        );
        assert_eq!(session.turns()[0].text, "My landlord locked me out");
        assert_eq!(session.turns()[3].text, "Next, file an FIR.");
    }

    #[tokio::test]
    async fn second_call_carries_accumulated_history() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(reply("First answer"));
        backend.push_ok(reply("Second answer"));

        let mut session = AdvisorSession::new(backend.clone(), &ModelRouter::new());
        session.advise("one").await;
        session.advise("two").await;

        let requests = backend.requests();
        assert!(requests[0].history.is_empty());
        assert_eq!(requests[1].history.len(), 2);
        assert_eq!(requests[1].history[1].text, "First answer");
    }

    #[tokio::test]
    async fn backend_failure_becomes_error_turn_and_session_continues() {
        let backend = Arc::new(MockBackend::new());
        backend.push_err(VidhiError::backend("connection refused", true));
        backend.push_ok(reply("Back online."));

        let mut session = AdvisorSession::new(backend.clone(), &ModelRouter::new());
        let text = session.advise("hello?").await;
        assert_eq!(text, BACKEND_FAILURE_APOLOGY);

        let error_turn = &session.turns()[1];
        assert_eq!(error_turn.role, TurnRole::Model);
        assert!(error_turn.is_error);

        // The failed exchange stays in the log; the next call still works.
        let text = session.advise("are you there?").await;
        assert_eq!(text, "Back online.");
        assert_eq!(session.turns().len(), 4);
    }

    #[tokio::test]
    async fn empty_reply_text_gets_fixed_fallback() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(BackendReply::default());

        let mut session = AdvisorSession::new(backend, &ModelRouter::new());
        let text = session.advise("hello").await;
        assert_eq!(text, EMPTY_RESPONSE_FALLBACK);
        assert!(!session.turns()[1].is_error);
    }

    #[tokio::test]
    async fn seeded_history_is_sent_to_the_backend() {
        let backend = Arc::new(MockBackend::new());
        backend.push_ok(reply("Continuing."));

        let prior = vec![Turn::model("Namaste. I am your legal companion.")];
        let mut session =
            AdvisorSession::with_history(backend.clone(), &ModelRouter::new(), prior);
        session.advise("thanks").await;

        let requests = backend.requests();
        assert_eq!(requests[0].history.len(), 1);
        assert_eq!(requests[0].history[0].role, TurnRole::Model);
        assert_eq!(session.turns().len(), 3);
    }
}
