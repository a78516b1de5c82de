//! Credential payloads, one variant per provider family
//!
//! The discriminant is preserved as an explicit `type` tag so the stored
//! settings stay compatible with the external settings store, while the enum
//! gives exhaustive checking of every adapter branch. None of the variants
//! carry the actual secret: keys and tokens live in the OS credential store
//! and are resolved through [`crate::compile::SecretStore`] at compile time.

use serde::{Deserialize, Serialize};

/// Authentication sub-mode for the Azure OpenAI gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AzureAuthMethod {
    /// Static API key forwarded by the proxy
    #[serde(rename = "api-key")]
    ApiKey,
    /// Entra bearer token exchanged by the proxy
    #[serde(rename = "token")]
    Token,
}

/// Discriminant of a [`Credentials`] value, used for gate checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ApiKey,
    Server,
    Gateway,
    Azure,
    Aws,
}

/// Per-family credential payload
///
/// Tagged union keyed by `type`; each variant carries exactly the fields one
/// provider family needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Credentials {
    /// Classic API-key provider; stores only a display prefix of the key
    ApiKey {
        /// First few characters of the key, for display only
        #[serde(default)]
        key_prefix: String,
    },
    /// Self-hosted server reachable at a user-supplied URL
    Server {
        /// Base URL of the server, without a trailing `/v1`
        server_url: String,
    },
    /// Self-hosted OpenAI-compatible gateway
    Gateway {
        /// Base URL of the gateway, without a trailing `/v1`
        server_url: String,
        /// Whether an API key was ever configured for this gateway
        #[serde(default)]
        has_api_key: bool,
    },
    /// Azure OpenAI gateway
    Azure {
        /// Resource endpoint, e.g. `https://myresource.openai.azure.com`
        endpoint: String,
        /// Deployment name; doubles as the model id when none is selected
        deployment: String,
        auth_method: AzureAuthMethod,
    },
    /// AWS cloud-native auth
    Aws {
        region: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile: Option<String>,
    },
}

impl Credentials {
    /// Discriminant of this credential payload
    pub const fn kind(&self) -> CredentialKind {
        match self {
            Credentials::ApiKey { .. } => CredentialKind::ApiKey,
            Credentials::Server { .. } => CredentialKind::Server,
            Credentials::Gateway { .. } => CredentialKind::Gateway,
            Credentials::Azure { .. } => CredentialKind::Azure,
            Credentials::Aws { .. } => CredentialKind::Aws,
        }
    }

    /// Display-safe summary that never exposes secret material
    pub fn redacted(&self) -> String {
        match self {
            Credentials::ApiKey { key_prefix } if key_prefix.is_empty() => {
                "api key (unset)".to_string()
            }
            Credentials::ApiKey { key_prefix } => format!("api key {key_prefix}…"),
            Credentials::Server { server_url } => format!("server {server_url}"),
            Credentials::Gateway {
                server_url,
                has_api_key,
            } => {
                if *has_api_key {
                    format!("gateway {server_url} (keyed)")
                } else {
                    format!("gateway {server_url}")
                }
            }
            Credentials::Azure {
                endpoint,
                deployment,
                ..
            } => format!("azure {endpoint} / {deployment}"),
            Credentials::Aws { region, .. } => format!("aws {region}"),
        }
    }
}
