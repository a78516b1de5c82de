//! Credential validation strategies
//!
//! One stateless strategy per provider family, dispatched through a fixed
//! registry. Expected failures (bad key, network error, timeout) are returned
//! as [`ValidationResult`] data; this module never propagates them as errors.

mod chat_probe;
mod metadata_probe;
mod probe;

pub use probe::{HttpProbe, ProbeError, ProbeResponse, ReqwestProbe};

use crate::provider::ProviderId;
use chat_probe::{ChatProbe, ANTHROPIC_CHAT_PROBE};
use lazy_static::lazy_static;
use metadata_probe::{MetadataProbe, OPENAI_METADATA_PROBE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of a credential validation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// A successful validation
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// A failed validation with a human-readable reason
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Validation strategy for one provider family
enum Strategy {
    /// Minimal completion request with ordered model fallback
    Chat(ChatProbe),
    /// Single GET against a cheap listing endpoint
    Metadata(MetadataProbe),
    /// Self-declared backends: accepted without a network call
    Trust,
}

lazy_static! {
    /// Fixed strategy registry, one entry per provider family
    static ref VALIDATORS: BTreeMap<ProviderId, Strategy> = {
        let mut registry = BTreeMap::new();
        registry.insert(ProviderId::Anthropic, Strategy::Chat(ANTHROPIC_CHAT_PROBE));
        registry.insert(ProviderId::OpenAi, Strategy::Metadata(OPENAI_METADATA_PROBE));
        registry.insert(ProviderId::Ollama, Strategy::Trust);
        registry.insert(ProviderId::LiteLlm, Strategy::Trust);
        registry.insert(ProviderId::Azure, Strategy::Trust);
        registry.insert(ProviderId::Bedrock, Strategy::Trust);
        registry
    };
}

/// Validate a raw credential against the provider's live API
///
/// All network traffic is bounded by `timeout`. The returned result is always
/// settled data; a provider with no registered strategy reports
/// "Unsupported provider".
pub async fn validate_key(
    provider: ProviderId,
    api_key: &str,
    timeout: Duration,
    probe: &dyn HttpProbe,
) -> ValidationResult {
    match VALIDATORS.get(&provider) {
        Some(Strategy::Chat(strategy)) => strategy.validate(api_key, timeout, probe).await,
        Some(Strategy::Metadata(strategy)) => strategy.validate(api_key, timeout, probe).await,
        Some(Strategy::Trust) => ValidationResult::ok(),
        None => ValidationResult::fail("Unsupported provider"),
    }
}
