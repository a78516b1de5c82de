//! AWS Bedrock compile adapter (proxy indirection)
//!
//! SigV4 signing happens inside the local proxy; the compiled entry carries a
//! deliberately empty `apiKey` so the downstream SDK does not reject the
//! config, and no auth headers of its own.

use super::models::{shape_models, ToolRule, BEDROCK_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{Credentials, ProviderId, ProviderSettings};
use async_trait::async_trait;
use tracing::{debug, warn};

pub(crate) struct BedrockAdapter;

#[async_trait]
impl ProviderAdapter for BedrockAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Bedrock
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        _secrets: &dyn SecretStore,
        proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::Bedrock)?;
        let selected = entry.selected_model.as_deref()?;
        let Credentials::Aws { region, .. } = &entry.credentials else {
            return None;
        };
        if region.is_empty() {
            debug!("bedrock entry has no region, skipping");
            return None;
        }

        let Some(proxy) = proxy else {
            debug!("no proxy broker supplied, skipping bedrock");
            return None;
        };

        let target = format!("https://bedrock-runtime.{region}.amazonaws.com");
        let local = match proxy.ensure(&target).await {
            Ok(endpoint) => endpoint,
            Err(error) => {
                warn!(%error, "proxy unavailable for bedrock");
                return None;
            }
        };

        Some(RuntimeConfig {
            package_handle: ProviderId::Bedrock.package_handle().to_string(),
            display_name: ProviderId::Bedrock.display_name().to_string(),
            connection_options: ConnectionOptions::new(local.base_url).with_api_key(""),
            models: shape_models(
                ProviderId::Bedrock,
                entry,
                selected,
                ToolRule::Fixed(true),
                BEDROCK_LIMIT,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::{FakeProxy, FakeSecrets};
    use crate::provider::ConnectedProvider;

    fn settings(region: &str) -> ProviderSettings {
        ProviderSettings::default().with_entry(
            ConnectedProvider::connected(
                ProviderId::Bedrock,
                Credentials::Aws {
                    region: region.to_string(),
                    profile: Some("default".to_string()),
                },
            )
            .with_selected_model("bedrock/anthropic.claude-sonnet-4-5-v1:0"),
        )
    }

    #[tokio::test]
    async fn test_compiles_through_proxy_with_empty_key() {
        let secrets = FakeSecrets::default();
        let proxy = FakeProxy::new();

        let config = BedrockAdapter
            .compile(&settings("us-east-1"), &secrets, Some(&proxy))
            .await
            .unwrap();

        assert_eq!(config.connection_options.base_url, "http://127.0.0.1:8411");
        assert_eq!(config.connection_options.api_key.as_deref(), Some(""));
        assert!(config.connection_options.headers.is_none());
        assert!(config
            .models
            .contains_key("anthropic.claude-sonnet-4-5-v1:0"));
    }

    #[tokio::test]
    async fn test_missing_region_fails_closed() {
        let secrets = FakeSecrets::default();
        let proxy = FakeProxy::new();

        let config = BedrockAdapter
            .compile(&settings(""), &secrets, Some(&proxy))
            .await;

        assert!(config.is_none());
    }

    #[tokio::test]
    async fn test_skipped_without_proxy_broker() {
        let secrets = FakeSecrets::default();
        let config = BedrockAdapter
            .compile(&settings("us-east-1"), &secrets, None)
            .await;
        assert!(config.is_none());
    }
}
