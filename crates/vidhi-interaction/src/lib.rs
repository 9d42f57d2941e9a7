//! Backend boundary for the Vidhi assistant.
//!
//! This crate owns everything that touches the generative-AI backend:
//! the [`GenerativeBackend`] trait and its Gemini REST implementation,
//! the [`ModelRouter`] that picks model and tools per task, inline
//! document encoding, and the geolocation provider boundary.

pub mod backend;
pub mod document;
pub mod gemini;
pub mod geolocation;
pub mod router;

pub use backend::{BackendReply, BackendRequest, GenerativeBackend, RequestPart, ToolSelection};
pub use document::{InlineDocument, SUPPORTED_MEDIA_TYPES};
pub use gemini::GeminiClient;
pub use geolocation::{
    FixedGeolocation, GeolocationProvider, PositionError, PositionRequest, UnavailableGeolocation,
};
pub use router::{ModelRoute, ModelRouter, TaskKind};
