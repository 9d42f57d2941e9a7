//! Conversation turn types for the advice flow.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Turn from the person seeking guidance.
    User,
    /// Turn from the generative model.
    Model,
}

/// A single turn in an advice conversation.
///
/// Turns are append-only: once recorded they are never edited, reordered,
/// or removed, even when the backend call behind a model turn failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    /// Set when a model turn was synthesized from a backend failure
    /// instead of a real completion.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates an error-flagged model turn standing in for a failed
    /// backend call.
    pub fn model_error(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
            is_error: true,
        }
    }
}
