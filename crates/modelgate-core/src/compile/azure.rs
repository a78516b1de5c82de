//! Azure OpenAI compile adapter (proxy indirection)
//!
//! The downstream runtime cannot speak Azure's auth schemes natively, so the
//! compiled entry always points at a locally running proxy obtained from the
//! proxy-lifecycle collaborator. The real endpoint is never contacted here.

use super::models::{shape_models, ToolRule, OPENAI_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, optional_secret, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{AzureAuthMethod, Credentials, ProviderId, ProviderSettings};
use async_trait::async_trait;
use tracing::{debug, warn};

pub(crate) struct AzureAdapter;

#[async_trait]
impl ProviderAdapter for AzureAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Azure
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::Azure)?;
        let Credentials::Azure {
            endpoint,
            deployment,
            auth_method,
        } = &entry.credentials
        else {
            return None;
        };

        let Some(proxy) = proxy else {
            debug!("no proxy broker supplied, skipping azure");
            return None;
        };

        let target = endpoint.trim_end_matches('/');
        let local = match proxy.ensure(target).await {
            Ok(endpoint) => endpoint,
            Err(error) => {
                warn!(%error, "proxy unavailable for azure");
                return None;
            }
        };

        let mut options = ConnectionOptions::new(local.base_url);
        match auth_method {
            AzureAuthMethod::ApiKey => {
                let Some(api_key) = optional_secret(secrets, ProviderId::Azure) else {
                    debug!("no api key stored for azure, skipping");
                    return None;
                };
                options = options.with_api_key(api_key);
            }
            AzureAuthMethod::Token => {
                let Some(token) = optional_secret(secrets, ProviderId::Azure) else {
                    // Fail closed: a token-auth entry with no token would
                    // compile to a config with no usable authentication.
                    warn!("azure token auth selected but no token stored, skipping");
                    return None;
                };
                // Some downstream SDKs error out on a missing key even when
                // auth travels in the Authorization header.
                options = options
                    .with_api_key("")
                    .with_header("Authorization", format!("Bearer {token}"));
            }
        }

        // The deployment name stands in for a stored model selection.
        let model = entry
            .selected_model
            .clone()
            .unwrap_or_else(|| deployment.clone());

        Some(RuntimeConfig {
            package_handle: ProviderId::Azure.package_handle().to_string(),
            display_name: ProviderId::Azure.display_name().to_string(),
            connection_options: options,
            models: shape_models(
                ProviderId::Azure,
                entry,
                &model,
                ToolRule::Fixed(true),
                OPENAI_LIMIT,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::{FakeProxy, FakeSecrets};
    use crate::provider::ConnectedProvider;

    fn settings(auth_method: AzureAuthMethod) -> ProviderSettings {
        ProviderSettings::default().with_entry(ConnectedProvider::connected(
            ProviderId::Azure,
            Credentials::Azure {
                endpoint: "https://r.openai.azure.com/".to_string(),
                deployment: "gpt-4o-prod".to_string(),
                auth_method,
            },
        ))
    }

    #[tokio::test]
    async fn test_token_mode_forces_empty_key_and_bearer_header() {
        let secrets = FakeSecrets::default().with(ProviderId::Azure, "abc");
        let proxy = FakeProxy::new();

        let config = AzureAdapter
            .compile(&settings(AzureAuthMethod::Token), &secrets, Some(&proxy))
            .await
            .unwrap();

        assert_eq!(config.connection_options.api_key.as_deref(), Some(""));
        assert_eq!(
            config.connection_options.headers.as_ref().unwrap()["Authorization"],
            "Bearer abc"
        );
        assert_eq!(config.connection_options.base_url, "http://127.0.0.1:8411");
    }

    #[tokio::test]
    async fn test_token_mode_without_token_fails_closed() {
        let secrets = FakeSecrets::default();
        let proxy = FakeProxy::new();

        let config = AzureAdapter
            .compile(&settings(AzureAuthMethod::Token), &secrets, Some(&proxy))
            .await;

        assert!(config.is_none());
    }

    #[tokio::test]
    async fn test_api_key_mode_has_no_headers() {
        let secrets = FakeSecrets::default().with(ProviderId::Azure, "azure-key");
        let proxy = FakeProxy::new();

        let config = AzureAdapter
            .compile(&settings(AzureAuthMethod::ApiKey), &secrets, Some(&proxy))
            .await
            .unwrap();

        assert_eq!(
            config.connection_options.api_key.as_deref(),
            Some("azure-key")
        );
        assert!(config.connection_options.headers.is_none());
    }

    #[tokio::test]
    async fn test_model_id_synthesized_from_deployment() {
        let secrets = FakeSecrets::default().with(ProviderId::Azure, "azure-key");
        let proxy = FakeProxy::new();

        let config = AzureAdapter
            .compile(&settings(AzureAuthMethod::ApiKey), &secrets, Some(&proxy))
            .await
            .unwrap();

        assert!(config.models.contains_key("gpt-4o-prod"));
    }

    #[tokio::test]
    async fn test_proxy_receives_trimmed_endpoint() {
        let secrets = FakeSecrets::default().with(ProviderId::Azure, "azure-key");
        let proxy = FakeProxy::new();

        AzureAdapter
            .compile(&settings(AzureAuthMethod::ApiKey), &secrets, Some(&proxy))
            .await
            .unwrap();

        // The fake records the target it was asked to front.
        assert_eq!(proxy.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
