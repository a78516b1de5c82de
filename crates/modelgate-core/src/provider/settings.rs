//! Connected-provider records and the settings container
//!
//! These shapes mirror what the external settings store persists. The broker
//! only reads them; the single mutation ([`ConnectedProvider::disconnect`])
//! exists for the settings layer to reuse so secret-bearing fields are
//! cleared uniformly.

use super::{Credentials, ProviderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection lifecycle state of a provider entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Tool-support metadata reported per model by self-hosted backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolSupport {
    Supported,
    Unsupported,
    /// The backend could not determine support; must never be treated as capable
    Unknown,
}

/// One model advertised by a connected provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_support: Option<ToolSupport>,
}

impl ModelEntry {
    /// Create a model entry without tool-support metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tool_support: None,
        }
    }

    /// Set tool-support metadata
    pub fn with_tool_support(mut self, support: ToolSupport) -> Self {
        self.tool_support = Some(support);
        self
    }
}

/// A provider the user has connected, as persisted by the settings store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectedProvider {
    pub provider: ProviderId,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    pub credentials: Credentials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_connected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_models: Vec<ModelEntry>,
}

impl ConnectedProvider {
    /// Create a freshly connected entry
    pub fn connected(provider: ProviderId, credentials: Credentials) -> Self {
        Self {
            provider,
            status: ConnectionStatus::Connected,
            selected_model: None,
            credentials,
            last_connected_at: Some(Utc::now()),
            available_models: Vec::new(),
        }
    }

    /// Set the selected model
    pub fn with_selected_model(mut self, model: impl Into<String>) -> Self {
        self.selected_model = Some(model.into());
        self
    }

    /// Set the advertised model list
    pub fn with_models(mut self, models: Vec<ModelEntry>) -> Self {
        self.available_models = models;
        self
    }

    /// Reset the entry on user disconnect
    ///
    /// Status goes back to `Disconnected` and the display key prefix is
    /// cleared to a placeholder so nothing credential-shaped survives in the
    /// persisted record.
    pub fn disconnect(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.last_connected_at = None;
        if let Credentials::ApiKey { key_prefix } = &mut self.credentials {
            key_prefix.clear();
        }
    }
}

/// The full provider settings the broker reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_provider: Option<ProviderId>,
    #[serde(default)]
    pub connected: HashMap<ProviderId, ConnectedProvider>,
}

impl ProviderSettings {
    /// Look up a provider entry regardless of its status
    pub fn entry(&self, provider: ProviderId) -> Option<&ConnectedProvider> {
        self.connected.get(&provider)
    }

    /// Insert or replace an entry (used by tests and the settings layer)
    pub fn with_entry(mut self, entry: ConnectedProvider) -> Self {
        self.connected.insert(entry.provider, entry);
        self
    }
}
