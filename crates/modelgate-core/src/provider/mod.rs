//! Provider identifiers and the settings shapes the broker reads
//!
//! The broker never owns or persists any of this: [`ProviderSettings`] is
//! produced by an external settings store and handed in read-only.

mod credentials;
mod settings;

pub use credentials::{AzureAuthMethod, CredentialKind, Credentials};
pub use settings::{
    ConnectedProvider, ConnectionStatus, ModelEntry, ProviderSettings, ToolSupport,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of supported backend families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Anthropic (Claude models)
    Anthropic,
    /// OpenAI (GPT models)
    OpenAi,
    /// Ollama (self-hosted local models)
    Ollama,
    /// LiteLLM (self-hosted OpenAI-compatible gateway)
    LiteLlm,
    /// Azure OpenAI (enterprise gateway, reached through the local proxy)
    Azure,
    /// AWS Bedrock (cloud-native auth, reached through the local proxy)
    Bedrock,
}

impl ProviderId {
    /// All registered provider ids, in registry order
    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::Anthropic,
            ProviderId::OpenAi,
            ProviderId::Ollama,
            ProviderId::LiteLlm,
            ProviderId::Azure,
            ProviderId::Bedrock,
        ]
    }

    /// Canonical provider id string
    pub const fn as_str(self) -> &'static str {
        match self {
            ProviderId::Anthropic => "anthropic",
            ProviderId::OpenAi => "openai",
            ProviderId::Ollama => "ollama",
            ProviderId::LiteLlm => "litellm",
            ProviderId::Azure => "azure",
            ProviderId::Bedrock => "bedrock",
        }
    }

    /// Parse a provider id string (canonical names plus common aliases)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "anthropic" | "claude" => Some(ProviderId::Anthropic),
            "openai" => Some(ProviderId::OpenAi),
            "ollama" => Some(ProviderId::Ollama),
            "litellm" => Some(ProviderId::LiteLlm),
            "azure" | "azure-openai" => Some(ProviderId::Azure),
            "bedrock" | "aws-bedrock" => Some(ProviderId::Bedrock),
            _ => None,
        }
    }

    /// Human-readable provider name
    pub const fn display_name(self) -> &'static str {
        match self {
            ProviderId::Anthropic => "Anthropic",
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Ollama => "Ollama",
            ProviderId::LiteLlm => "LiteLLM",
            ProviderId::Azure => "Azure OpenAI",
            ProviderId::Bedrock => "AWS Bedrock",
        }
    }

    /// Runtime plugin package handle consumed by the downstream agent runtime
    pub const fn package_handle(self) -> &'static str {
        match self {
            ProviderId::Anthropic => "@ai-sdk/anthropic",
            ProviderId::OpenAi => "@ai-sdk/openai",
            // Self-hosted and gateway backends all speak the OpenAI wire
            // protocol downstream.
            ProviderId::Ollama | ProviderId::LiteLlm | ProviderId::Azure | ProviderId::Bedrock => {
                "@ai-sdk/openai-compatible"
            }
        }
    }

    /// The credential discriminant this provider family expects
    pub const fn expected_credentials(self) -> CredentialKind {
        match self {
            ProviderId::Anthropic | ProviderId::OpenAi => CredentialKind::ApiKey,
            ProviderId::Ollama => CredentialKind::Server,
            ProviderId::LiteLlm => CredentialKind::Gateway,
            ProviderId::Azure => CredentialKind::Azure,
            ProviderId::Bedrock => CredentialKind::Aws,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
