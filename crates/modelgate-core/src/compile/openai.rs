//! OpenAI compile adapter

use super::models::{shape_models, ToolRule, OPENAI_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, optional_secret, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{ProviderId, ProviderSettings};
use async_trait::async_trait;

const BASE_URL: &str = "https://api.openai.com/v1";

pub(crate) struct OpenAiAdapter;

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        _proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::OpenAi)?;
        let selected = entry.selected_model.as_deref()?;

        let mut options = ConnectionOptions::new(BASE_URL);
        if let Some(api_key) = optional_secret(secrets, ProviderId::OpenAi) {
            options = options.with_api_key(api_key);
        }

        Some(RuntimeConfig {
            package_handle: ProviderId::OpenAi.package_handle().to_string(),
            display_name: ProviderId::OpenAi.display_name().to_string(),
            connection_options: options,
            models: shape_models(
                ProviderId::OpenAi,
                entry,
                selected,
                ToolRule::Fixed(true),
                OPENAI_LIMIT,
            ),
        })
    }
}
