//! Metadata-probe validation strategy
//!
//! Used where the backend has a stable, cheap model-listing endpoint: one
//! authenticated GET decides validity.

use super::probe::{HttpProbe, ProbeError};
use super::ValidationResult;
use std::time::Duration;
use tracing::debug;

/// Metadata-probe strategy for one provider family
pub(crate) struct MetadataProbe {
    /// Full URL of the listing endpoint
    pub endpoint: &'static str,
}

/// The OpenAI strategy instance
pub(crate) const OPENAI_METADATA_PROBE: MetadataProbe = MetadataProbe {
    endpoint: "https://api.openai.com/v1/models",
};

impl MetadataProbe {
    /// Probe the backend's listing endpoint once
    pub async fn validate(
        &self,
        api_key: &str,
        timeout: Duration,
        probe: &dyn HttpProbe,
    ) -> ValidationResult {
        let bearer = format!("Bearer {api_key}");
        let headers = [("Authorization", bearer.as_str())];

        let response = match probe.get(self.endpoint, &headers, timeout).await {
            Ok(response) => response,
            Err(ProbeError::TimedOut) => return ValidationResult::fail("Request timed out"),
            Err(ProbeError::Connect(message)) => {
                return ValidationResult::fail(format!("Connection failed: {message}"))
            }
        };

        if response.is_success() {
            debug!("metadata probe succeeded");
            return ValidationResult::ok();
        }

        let message = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        ValidationResult::fail(message)
    }
}
