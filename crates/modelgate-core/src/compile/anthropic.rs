//! Anthropic compile adapter

use super::models::{shape_models, ToolRule, ANTHROPIC_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, optional_secret, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{ProviderId, ProviderSettings};
use async_trait::async_trait;

const BASE_URL: &str = "https://api.anthropic.com/v1";

pub(crate) struct AnthropicAdapter;

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        _proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::Anthropic)?;
        let selected = entry.selected_model.as_deref()?;

        let mut options = ConnectionOptions::new(BASE_URL);
        // Omitted entirely when no secret is stored: the downstream client
        // then falls back to its own default auth handling.
        if let Some(api_key) = optional_secret(secrets, ProviderId::Anthropic) {
            options = options.with_api_key(api_key);
        }

        Some(RuntimeConfig {
            package_handle: ProviderId::Anthropic.package_handle().to_string(),
            display_name: ProviderId::Anthropic.display_name().to_string(),
            connection_options: options,
            models: shape_models(
                ProviderId::Anthropic,
                entry,
                selected,
                ToolRule::Fixed(true),
                ANTHROPIC_LIMIT,
            ),
        })
    }
}
