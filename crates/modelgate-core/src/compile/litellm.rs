//! LiteLLM compile adapter (self-hosted OpenAI-compatible gateway)
//!
//! The gateway credential records whether a key was ever configured; that
//! flag, not the secret store, decides whether an `apiKey` field is emitted.

use super::models::{shape_models, ToolRule, SELF_HOSTED_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{Credentials, ProviderId, ProviderSettings};
use async_trait::async_trait;

pub(crate) struct LiteLlmAdapter;

#[async_trait]
impl ProviderAdapter for LiteLlmAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::LiteLlm
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        _proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::LiteLlm)?;
        let selected = entry.selected_model.as_deref()?;
        let Credentials::Gateway {
            server_url,
            has_api_key,
        } = &entry.credentials
        else {
            return None;
        };

        let base_url = format!("{}/v1", server_url.trim_end_matches('/'));
        let mut options = ConnectionOptions::new(base_url);
        // Strictly flag-gated: whatever the store would return is ignored
        // when the user never configured a key for this gateway.
        if *has_api_key {
            if let Some(api_key) = secrets.api_key(ProviderId::LiteLlm) {
                options = options.with_api_key(api_key);
            }
        }

        Some(RuntimeConfig {
            package_handle: ProviderId::LiteLlm.package_handle().to_string(),
            display_name: ProviderId::LiteLlm.display_name().to_string(),
            connection_options: options,
            models: shape_models(
                ProviderId::LiteLlm,
                entry,
                selected,
                ToolRule::Metadata,
                SELF_HOSTED_LIMIT,
            ),
        })
    }
}
