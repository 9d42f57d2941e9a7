//! Secret management for backend API keys.
//!
//! Secrets live in `secret.json` under the platform config directory and
//! must never leak into log output or error messages.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidhiError};

/// Gemini credentials section of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

/// Service for loading secret configuration.
///
/// Implementations should keep secret files at restrictive permissions
/// (600 on Unix) and keep key material out of error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks whether the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}

/// File-backed [`SecretService`] reading `secret.json`.
///
/// Loads are cached after the first read.
#[derive(Clone)]
pub struct FileSecretService {
    path: PathBuf,
    cached: Arc<RwLock<Option<SecretConfig>>>,
}

impl FileSecretService {
    /// Creates a service reading from the default location,
    /// `<config dir>/vidhi/secret.json`.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| VidhiError::config("Could not determine config directory"))?;
        Ok(Self::new(base.join("vidhi").join("secret.json")))
    }

    /// Creates a service reading from an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates the secret file with an empty template if it does not
    /// exist, setting permissions to 600 on Unix.
    pub fn ensure_secret_file(&self) -> Result<&Path> {
        if self.path.exists() {
            return Ok(&self.path);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig::default()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(&self.path)
    }

    fn load_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self.cached.read().expect("secret cache lock poisoned");
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        // Error messages mention the path only, never file contents.
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            VidhiError::config(format!(
                "Failed to read secret file {}: {}",
                self.path.display(),
                e.kind()
            ))
        })?;
        let config: SecretConfig = serde_json::from_str(&raw)
            .map_err(|_| VidhiError::config("secret.json is not valid JSON"))?;

        let mut write_lock = self.cached.write().expect("secret cache lock poisoned");
        *write_lock = Some(config.clone());
        Ok(config)
    }
}

#[async_trait::async_trait]
impl SecretService for FileSecretService {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_gemini_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini": {"api_key": "k-123"}}"#).unwrap();

        let service = FileSecretService::new(&path);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "k-123");
    }

    #[tokio::test]
    async fn ensure_creates_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("secret.json");

        let service = FileSecretService::new(&path);
        assert!(!service.secret_file_exists().await);
        service.ensure_secret_file().unwrap();
        assert!(service.secret_file_exists().await);

        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "");
    }

    #[tokio::test]
    async fn invalid_json_does_not_leak_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, "api_key=super-secret").unwrap();

        let service = FileSecretService::new(&path);
        let err = service.load_secrets().await.unwrap_err();
        assert!(!err.to_string().contains("super-secret"));
    }
}
