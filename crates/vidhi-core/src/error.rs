//! Error types for the Vidhi assistant core.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire assistant core.
///
/// The conversational, decoder, and finder flows all recover from these
/// locally (error-flagged turns or fixed fallback strings); none of the
/// variants is fatal to the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum VidhiError {
    /// The generative backend could not be reached or returned a failure.
    #[error("Backend unavailable: {message}")]
    BackendUnavailable {
        message: String,
        retryable: bool,
        /// Server-requested backoff, from a `Retry-After` header when
        /// the backend sent one.
        retry_after: Option<Duration>,
    },

    /// An uploaded document's mime type is outside the allow-list.
    /// Surfaced before any backend call is attempted.
    #[error("Unsupported media type: {mime}")]
    UnsupportedMediaType { mime: String },

    /// Neither text nor a document was supplied; short-circuited locally.
    #[error("No input to process")]
    EmptyInput,

    /// The geolocation lookup failed; the caller falls back to a
    /// text-only query.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VidhiError {
    /// Creates a BackendUnavailable error.
    pub fn backend(message: impl Into<String>, retryable: bool) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            retryable,
            retry_after: None,
        }
    }

    /// Creates a BackendUnavailable error carrying a server-requested
    /// backoff delay.
    pub fn backend_with_retry_after(
        message: impl Into<String>,
        retryable: bool,
        delay: Duration,
    ) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            retryable,
            retry_after: Some(delay),
        }
    }

    /// Creates an UnsupportedMediaType error.
    pub fn unsupported_media(mime: impl Into<String>) -> Self {
        Self::UnsupportedMediaType { mime: mime.into() }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a BackendUnavailable error.
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    /// Check if the failure is worth retrying (rate limits, transient
    /// network errors).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { retryable: true, .. })
    }

    /// The backoff the backend asked for, when it sent one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::BackendUnavailable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<std::io::Error> for VidhiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VidhiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VidhiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for VidhiError {
    fn from(err: reqwest::Error) -> Self {
        Self::BackendUnavailable {
            retryable: err.is_connect() || err.is_timeout(),
            message: err.to_string(),
            retry_after: None,
        }
    }
}

/// A type alias for `Result<T, VidhiError>`.
pub type Result<T> = std::result::Result<T, VidhiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_reports_retryability() {
        let err = VidhiError::backend("503 from upstream", true);
        assert!(err.is_backend_unavailable());
        assert!(err.is_retryable());

        let err = VidhiError::backend("bad request", false);
        assert!(!err.is_retryable());
    }

    #[test]
    fn retry_after_is_carried_when_present() {
        let err = VidhiError::backend("503 from upstream", true);
        assert_eq!(err.retry_after(), None);

        let err = VidhiError::backend_with_retry_after(
            "rate limited",
            true,
            Duration::from_secs(30),
        );
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));

        assert_eq!(VidhiError::EmptyInput.retry_after(), None);
    }

    #[test]
    fn unsupported_media_mentions_mime() {
        let err = VidhiError::unsupported_media("application/zip");
        assert!(err.to_string().contains("application/zip"));
    }
}
