//! Generative backend seam.
//!
//! The application layer speaks to the model through [`GenerativeBackend`],
//! which takes a fully routed request (model identity, system instruction,
//! history, message parts, tool selection) and returns the reply text plus
//! any grounding chunks. Tests substitute scripted implementations.

use async_trait::async_trait;

use vidhi_core::error::Result;
use vidhi_core::grounding::{Coordinates, GroundingResult};
use vidhi_core::Turn;

use crate::document::InlineDocument;

/// Capability selection attached to a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSelection {
    /// Enables the location-search (maps grounding) tool.
    pub location_search: bool,
    /// Spatial bias applied to location search when present.
    pub spatial_bias: Option<Coordinates>,
}

/// One part of the outgoing message.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPart {
    Text(String),
    /// Base64-encoded document embedded directly in the request.
    Inline(InlineDocument),
}

/// A routed request ready for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    /// Prior conversation turns, oldest first. Empty for one-shot calls.
    pub history: Vec<Turn>,
    /// Parts of the new message.
    pub parts: Vec<RequestPart>,
    pub tools: ToolSelection,
}

/// Backend reply.
///
/// A reply with no text is represented as an empty string, never as an
/// error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendReply {
    pub text: String,
    pub grounding: Vec<GroundingResult>,
}

/// Boundary to the generative-AI backend.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Executes one generation call.
    ///
    /// # Errors
    ///
    /// Returns [`VidhiError::BackendUnavailable`] when the call cannot be
    /// completed; callers downgrade this to fallback text or an
    /// error-flagged turn.
    ///
    /// [`VidhiError::BackendUnavailable`]: vidhi_core::VidhiError::BackendUnavailable
    async fn generate(&self, request: BackendRequest) -> Result<BackendReply>;
}
