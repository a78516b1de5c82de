//! Ollama compile adapter (self-hosted server)

use super::models::{shape_models, ToolRule, SELF_HOSTED_LIMIT};
use super::output::{ConnectionOptions, RuntimeConfig};
use super::{connected_entry, optional_secret, ProviderAdapter, ProxyBroker, SecretStore};
use crate::provider::{Credentials, ProviderId, ProviderSettings};
use async_trait::async_trait;

pub(crate) struct OllamaAdapter;

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Ollama
    }

    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        _proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig> {
        let entry = connected_entry(settings, ProviderId::Ollama)?;
        let selected = entry.selected_model.as_deref()?;
        let Credentials::Server { server_url } = &entry.credentials else {
            return None;
        };

        let base_url = format!("{}/v1", server_url.trim_end_matches('/'));
        let mut options = ConnectionOptions::new(base_url);
        // Most local servers run without auth; only forward a key the user
        // actually stored.
        if let Some(api_key) = optional_secret(secrets, ProviderId::Ollama) {
            options = options.with_api_key(api_key);
        }

        Some(RuntimeConfig {
            package_handle: ProviderId::Ollama.package_handle().to_string(),
            display_name: ProviderId::Ollama.display_name().to_string(),
            connection_options: options,
            models: shape_models(
                ProviderId::Ollama,
                entry,
                selected,
                ToolRule::Metadata,
                SELF_HOSTED_LIMIT,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::FakeSecrets;
    use crate::provider::{ConnectedProvider, ModelEntry, ToolSupport};

    fn settings(models: Vec<ModelEntry>) -> ProviderSettings {
        ProviderSettings::default().with_entry(
            ConnectedProvider::connected(
                ProviderId::Ollama,
                Credentials::Server {
                    server_url: "http://localhost:11434/".to_string(),
                },
            )
            .with_selected_model("llama3.1")
            .with_models(models),
        )
    }

    #[tokio::test]
    async fn test_base_url_gets_v1_suffix_without_doubled_slash() {
        let secrets = FakeSecrets::default();
        let config = OllamaAdapter
            .compile(&settings(vec![]), &secrets, None)
            .await
            .unwrap();

        assert_eq!(
            config.connection_options.base_url,
            "http://localhost:11434/v1"
        );
        assert!(config.connection_options.api_key.is_none());
    }

    #[tokio::test]
    async fn test_tool_support_metadata_is_used_directly() {
        let secrets = FakeSecrets::default();
        let config = OllamaAdapter
            .compile(
                &settings(vec![
                    ModelEntry::new("m1", "M1").with_tool_support(ToolSupport::Supported),
                    ModelEntry::new("m2", "M2").with_tool_support(ToolSupport::Unknown),
                ]),
                &secrets,
                None,
            )
            .await
            .unwrap();

        assert!(config.models["m1"].tools_capable);
        assert!(!config.models["m2"].tools_capable);
    }
}
