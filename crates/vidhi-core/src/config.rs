//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for the assistant core, loaded from `config.toml`.
///
/// Model identifiers are optional overrides; when absent the router's
/// built-in table applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VidhiConfig {
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub geolocation: GeolocationSettings,
}

/// Optional per-task model overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSettings {
    /// High-reasoning model for the advice flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor: Option<String>,
    /// Fast multimodal model for summarization and grounding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast: Option<String>,
}

/// Geolocation lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationSettings {
    /// Whether to request high-accuracy positioning.
    #[serde(default)]
    pub enable_high_accuracy: bool,
    /// How long to wait for a position before falling back to a
    /// text-only search.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum age of a cached position that is still acceptable.
    #[serde(default)]
    pub max_cached_age_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout_secs: default_timeout_secs(),
            max_cached_age_secs: 0,
        }
    }
}

impl VidhiConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&raw)?)
    }
}
