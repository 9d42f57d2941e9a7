//! Geolocation provider boundary.
//!
//! The assistant never blocks on positioning: a failed or slow lookup is
//! downgraded to a text-only search by the caller.

use std::time::Duration;

use async_trait::async_trait;

use vidhi_core::config::GeolocationSettings;
use vidhi_core::grounding::Coordinates;

/// Options for a position lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRequest {
    pub enable_high_accuracy: bool,
    /// Maximum time to wait for a fix.
    pub timeout: Duration,
    /// Oldest acceptable cached position.
    pub maximum_age: Duration,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout: Duration::from_secs(15),
            maximum_age: Duration::ZERO,
        }
    }
}

impl From<&GeolocationSettings> for PositionRequest {
    fn from(settings: &GeolocationSettings) -> Self {
        Self {
            enable_high_accuracy: settings.enable_high_accuracy,
            timeout: Duration::from_secs(settings.timeout_secs),
            maximum_age: Duration::from_secs(settings.max_cached_age_secs),
        }
    }
}

/// Why a position lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for a position")]
    Timeout,
}

/// Source of the device's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Requests the current position.
    async fn current_position(
        &self,
        request: PositionRequest,
    ) -> Result<Coordinates, PositionError>;
}

/// Provider for headless environments; every lookup fails with
/// [`PositionError::PositionUnavailable`], which callers treat as a
/// non-fatal warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGeolocation;

#[async_trait]
impl GeolocationProvider for UnavailableGeolocation {
    async fn current_position(
        &self,
        _request: PositionRequest,
    ) -> Result<Coordinates, PositionError> {
        Err(PositionError::PositionUnavailable)
    }
}

/// Provider returning a fixed position, for wiring tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation(pub Coordinates);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(
        &self,
        _request: PositionRequest,
    ) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_provider_always_fails() {
        let provider = UnavailableGeolocation;
        let err = provider
            .current_position(PositionRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, PositionError::PositionUnavailable);
    }

    #[test]
    fn request_derives_from_settings() {
        let settings = GeolocationSettings {
            enable_high_accuracy: true,
            timeout_secs: 5,
            max_cached_age_secs: 60,
        };
        let request = PositionRequest::from(&settings);
        assert!(request.enable_high_accuracy);
        assert_eq!(request.timeout, Duration::from_secs(5));
        assert_eq!(request.maximum_age, Duration::from_secs(60));
    }
}
