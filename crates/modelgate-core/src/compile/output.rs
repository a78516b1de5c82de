//! Compiled runtime configuration shapes
//!
//! These types serialize into the configuration file consumed by the
//! downstream agent-runtime CLI. They are recomputed from scratch at every
//! runtime launch and never persisted by the broker.

use crate::provider::ProviderId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Conservative token limits for a model entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLimit {
    pub context: u32,
    pub output: u32,
}

/// One model entry in a compiled provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub name: String,
    pub tools_capable: bool,
    pub limit: TokenLimit,
}

/// Connection options for the downstream client
///
/// `api_key` and `headers` are omitted from the serialized form when absent;
/// an *empty-string* key is only ever emitted deliberately (token-auth proxy
/// mode, where some downstream SDKs refuse a missing key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    #[serde(
        rename = "apiKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl ConnectionOptions {
    /// Options with a base URL only
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            headers: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a single header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// One compiled provider entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Runtime plugin package handle, e.g. `@ai-sdk/anthropic`
    #[serde(rename = "package")]
    pub package_handle: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "options")]
    pub connection_options: ConnectionOptions,
    /// Model table keyed by the prefix-stripped model id
    pub models: BTreeMap<String, ModelConfig>,
}

/// The full configuration file handed to the downstream agent-runtime CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfigFile {
    #[serde(rename = "provider")]
    pub providers: BTreeMap<String, RuntimeConfig>,
}

impl RuntimeConfigFile {
    /// Assemble the file from compiled provider entries
    pub fn from_compiled(compiled: BTreeMap<ProviderId, RuntimeConfig>) -> Self {
        Self {
            providers: compiled
                .into_iter()
                .map(|(provider, config)| (provider.as_str().to_string(), config))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_api_key_is_omitted() {
        let options = ConnectionOptions::new("https://api.example.com/v1");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["baseURL"], "https://api.example.com/v1");
        assert!(json.get("apiKey").is_none());
        assert!(json.get("headers").is_none());
    }

    #[test]
    fn test_forced_empty_api_key_survives_serialization() {
        let options = ConnectionOptions::new("http://127.0.0.1:8411")
            .with_api_key("")
            .with_header("Authorization", "Bearer abc");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["apiKey"], "");
        assert_eq!(json["headers"]["Authorization"], "Bearer abc");
    }

    #[test]
    fn test_runtime_config_file_keys() {
        let mut compiled = BTreeMap::new();
        compiled.insert(
            ProviderId::Anthropic,
            RuntimeConfig {
                package_handle: "@ai-sdk/anthropic".to_string(),
                display_name: "Anthropic".to_string(),
                connection_options: ConnectionOptions::new("https://api.anthropic.com/v1"),
                models: BTreeMap::new(),
            },
        );

        let file = RuntimeConfigFile::from_compiled(compiled);
        let json = serde_json::to_value(&file).unwrap();
        assert!(json["provider"]["anthropic"].is_object());
        assert_eq!(json["provider"]["anthropic"]["package"], "@ai-sdk/anthropic");
    }
}
