//! Chat-probe validation strategy
//!
//! Used for backends without a stable, cheap metadata endpoint: sends a
//! one-token completion against an ordered, newest-first list of candidate
//! models. A 404 for one candidate only means that model is gone, so the
//! probe advances down the list; a 401 is model-independent and stops the
//! whole probe immediately.

use super::probe::{HttpProbe, ProbeError};
use super::ValidationResult;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Candidate models for the Anthropic probe, newest first.
///
/// This list is hard-coded and manually ordered; there is no refresh
/// mechanism, so it needs a manual update when Anthropic deprecates the
/// older entries.
pub(crate) const ANTHROPIC_PROBE_MODELS: &[&str] = &[
    "claude-sonnet-4-5",
    "claude-sonnet-4-20250514",
    "claude-3-7-sonnet-20250219",
    "claude-3-5-haiku-20241022",
];

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Chat-probe strategy for one provider family
pub(crate) struct ChatProbe {
    /// Full URL of the completion endpoint
    pub endpoint: &'static str,
    /// Ordered candidate model ids, newest first
    pub candidates: &'static [&'static str],
}

/// The Anthropic strategy instance
pub(crate) const ANTHROPIC_CHAT_PROBE: ChatProbe = ChatProbe {
    endpoint: "https://api.anthropic.com/v1/messages",
    candidates: ANTHROPIC_PROBE_MODELS,
};

/// Error code and message extracted from an upstream error body
fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, None);
    };
    let code = value["error"]["type"].as_str().map(str::to_string);
    let message = value["error"]["message"].as_str().map(str::to_string);
    (code, message)
}

impl ChatProbe {
    /// Probe the backend with a minimal completion request per candidate
    pub async fn validate(
        &self,
        api_key: &str,
        timeout: Duration,
        probe: &dyn HttpProbe,
    ) -> ValidationResult {
        for model in self.candidates {
            let body = json!({
                "model": model,
                "max_tokens": 1,
                "messages": [{"role": "user", "content": "hi"}],
            });
            let headers = [
                ("x-api-key", api_key),
                ("anthropic-version", ANTHROPIC_VERSION),
            ];

            let response = match probe.post_json(self.endpoint, &headers, &body, timeout).await {
                Ok(response) => response,
                Err(ProbeError::TimedOut) => return ValidationResult::fail("Request timed out"),
                Err(ProbeError::Connect(message)) => {
                    return ValidationResult::fail(format!("Connection failed: {message}"))
                }
            };

            if response.is_success() {
                debug!(model, "chat probe succeeded");
                return ValidationResult::ok();
            }

            let (code, message) = parse_error_body(&response.body);

            // An auth rejection is model-independent: stop immediately.
            if response.status == 401 || code.as_deref() == Some("authentication_error") {
                return ValidationResult::fail(
                    message.unwrap_or_else(|| "Invalid API key".to_string()),
                );
            }

            // This specific model is unavailable; try the next candidate.
            if response.status == 404 || code.as_deref() == Some("not_found_error") {
                debug!(model, "probe model unavailable, trying next candidate");
                continue;
            }

            return ValidationResult::fail(
                message.unwrap_or_else(|| format!("HTTP {}", response.status)),
            );
        }

        ValidationResult::fail("No available models")
    }
}
