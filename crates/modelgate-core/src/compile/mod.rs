//! Provider configuration compiler
//!
//! Turns stored settings plus a secret lookup (and, for gateway providers, a
//! proxy-lifecycle collaborator) into normalized runtime configuration
//! entries. Compilation is a pure function of its inputs: no side effects,
//! nothing persisted. A provider that fails any gate is silently omitted and
//! logged, and one provider's failure never affects another's.

mod anthropic;
mod azure;
mod bedrock;
mod litellm;
mod models;
mod ollama;
mod openai;
mod output;

pub use models::strip_model_prefix;
pub use output::{
    ConnectionOptions, ModelConfig, RuntimeConfig, RuntimeConfigFile, TokenLimit,
};

use crate::error::GateResult;
use crate::provider::{ConnectedProvider, ConnectionStatus, ProviderId, ProviderSettings};
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Read-only lookup of provider secrets
///
/// Backed by an OS-level secure credential store outside this crate; the
/// broker never reads or writes that store directly.
pub trait SecretStore: Send + Sync {
    /// The secret for one provider, if any is stored
    fn api_key(&self, provider: ProviderId) -> Option<String>;
}

/// A locally running proxy endpoint for one target base URL
#[derive(Debug, Clone)]
pub struct ProxyEndpoint {
    /// Local base URL the runtime should talk to
    pub base_url: String,
    /// The real target the proxy forwards to
    pub target_base_url: String,
    pub port: u16,
}

/// Proxy-lifecycle collaborator
///
/// `ensure` is an idempotent "make sure a proxy for this target is running"
/// call: repeated or concurrent calls for the same target must converge on
/// one local proxy. Only the returned `base_url` is consumed here.
#[async_trait]
pub trait ProxyBroker: Send + Sync {
    async fn ensure(&self, target_base_url: &str) -> GateResult<ProxyEndpoint>;
}

/// One provider family's compile adapter
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The provider family this adapter compiles
    fn provider(&self) -> ProviderId;

    /// Compile the stored settings into one runtime entry, or `None` on any
    /// gate failure
    async fn compile(
        &self,
        settings: &ProviderSettings,
        secrets: &dyn SecretStore,
        proxy: Option<&dyn ProxyBroker>,
    ) -> Option<RuntimeConfig>;
}

lazy_static! {
    /// Fixed adapter registry, keyed by provider id
    static ref ADAPTERS: BTreeMap<ProviderId, Box<dyn ProviderAdapter>> = {
        let adapters: Vec<Box<dyn ProviderAdapter>> = vec![
            Box::new(anthropic::AnthropicAdapter),
            Box::new(openai::OpenAiAdapter),
            Box::new(ollama::OllamaAdapter),
            Box::new(litellm::LiteLlmAdapter),
            Box::new(azure::AzureAdapter),
            Box::new(bedrock::BedrockAdapter),
        ];
        adapters
            .into_iter()
            .map(|adapter| (adapter.provider(), adapter))
            .collect()
    };
}

/// Shared gate: the connected, credential-consistent entry for a provider
///
/// Returns `None` when the entry is missing, not connected, or carries a
/// credential payload whose discriminant does not match the provider family.
/// The mismatch case is defensive: it should not occur in well-formed
/// settings, but must reject rather than crash.
pub(crate) fn connected_entry(
    settings: &ProviderSettings,
    provider: ProviderId,
) -> Option<&ConnectedProvider> {
    let entry = settings.entry(provider)?;
    if entry.status != ConnectionStatus::Connected {
        debug!(provider = %provider, status = ?entry.status, "provider not connected");
        return None;
    }
    if entry.credentials.kind() != provider.expected_credentials() {
        warn!(
            provider = %provider,
            credentials = %entry.credentials.redacted(),
            "credential shape does not match provider family"
        );
        return None;
    }
    Some(entry)
}

/// A stored secret, treating empty strings as absent
pub(crate) fn optional_secret(secrets: &dyn SecretStore, provider: ProviderId) -> Option<String> {
    secrets.api_key(provider).filter(|key| !key.is_empty())
}

/// Compile one provider
pub async fn compile(
    provider: ProviderId,
    settings: &ProviderSettings,
    secrets: &dyn SecretStore,
    proxy: Option<&dyn ProxyBroker>,
) -> Option<RuntimeConfig> {
    let adapter = ADAPTERS.get(&provider)?;
    adapter.compile(settings, secrets, proxy).await
}

/// Compile every registered provider, keeping only the ones that succeed
///
/// Providers are fully isolated from each other: a gate failure, missing
/// secret, or proxy failure in one only removes that one from the result.
pub async fn compile_all(
    settings: &ProviderSettings,
    secrets: &dyn SecretStore,
    proxy: Option<&dyn ProxyBroker>,
) -> BTreeMap<ProviderId, RuntimeConfig> {
    let mut compiled = BTreeMap::new();
    for (provider, adapter) in ADAPTERS.iter() {
        match adapter.compile(settings, secrets, proxy).await {
            Some(config) => {
                compiled.insert(*provider, config);
            }
            None => {
                debug!(provider = %provider, "omitted from runtime configuration");
            }
        }
    }
    compiled
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::error::GateError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory secret store for tests
    #[derive(Default)]
    pub struct FakeSecrets {
        keys: HashMap<ProviderId, String>,
    }

    impl FakeSecrets {
        pub fn with(mut self, provider: ProviderId, key: &str) -> Self {
            self.keys.insert(provider, key.to_string());
            self
        }
    }

    impl SecretStore for FakeSecrets {
        fn api_key(&self, provider: ProviderId) -> Option<String> {
            self.keys.get(&provider).cloned()
        }
    }

    /// Proxy broker handing out a fixed local endpoint, counting calls
    pub struct FakeProxy {
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl FakeProxy {
        pub fn new() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProxyBroker for FakeProxy {
        async fn ensure(&self, target_base_url: &str) -> GateResult<ProxyEndpoint> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GateError::proxy("proxy spawn failed"));
            }
            Ok(ProxyEndpoint {
                base_url: "http://127.0.0.1:8411".to_string(),
                target_base_url: target_base_url.to_string(),
                port: 8411,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{FakeProxy, FakeSecrets};
    use super::*;
    use crate::provider::{AzureAuthMethod, ConnectedProvider, Credentials};
    use std::sync::atomic::Ordering;

    fn settings_with(entry: ConnectedProvider) -> ProviderSettings {
        ProviderSettings::default().with_entry(entry)
    }

    fn anthropic_connected() -> ConnectedProvider {
        ConnectedProvider::connected(
            ProviderId::Anthropic,
            Credentials::ApiKey {
                key_prefix: "sk-ant".to_string(),
            },
        )
        .with_selected_model("claude-sonnet-4-5")
    }

    fn azure_connected(auth_method: AzureAuthMethod) -> ConnectedProvider {
        ConnectedProvider::connected(
            ProviderId::Azure,
            Credentials::Azure {
                endpoint: "https://r.openai.azure.com".to_string(),
                deployment: "gpt-4o-prod".to_string(),
                auth_method,
            },
        )
    }

    #[tokio::test]
    async fn test_missing_entry_compiles_to_none() {
        let settings = ProviderSettings::default();
        let secrets = FakeSecrets::default();
        let compiled = compile(ProviderId::Anthropic, &settings, &secrets, None).await;
        assert!(compiled.is_none());
    }

    #[tokio::test]
    async fn test_not_connected_compiles_to_none() {
        let mut entry = anthropic_connected();
        entry.status = ConnectionStatus::Error;
        let settings = settings_with(entry);
        let secrets = FakeSecrets::default();
        assert!(compile(ProviderId::Anthropic, &settings, &secrets, None)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_credential_shape_mismatch_compiles_to_none() {
        // An anthropic entry carrying server credentials is malformed
        // settings data; the gate must reject it, not panic.
        let entry = ConnectedProvider::connected(
            ProviderId::Anthropic,
            Credentials::Server {
                server_url: "http://localhost:11434".to_string(),
            },
        )
        .with_selected_model("claude-sonnet-4-5");
        let settings = settings_with(entry);
        let secrets = FakeSecrets::default();
        assert!(compile(ProviderId::Anthropic, &settings, &secrets, None)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_selected_model_compiles_to_none() {
        let mut entry = anthropic_connected();
        entry.selected_model = None;
        let settings = settings_with(entry);
        let secrets = FakeSecrets::default();
        assert!(compile(ProviderId::Anthropic, &settings, &secrets, None)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_compile_all_skips_proxy_providers_without_broker() {
        let settings = settings_with(anthropic_connected())
            .with_entry(azure_connected(AzureAuthMethod::ApiKey));
        let secrets = FakeSecrets::default()
            .with(ProviderId::Anthropic, "sk-ant-key")
            .with(ProviderId::Azure, "azure-key");

        let compiled = compile_all(&settings, &secrets, None).await;

        assert!(compiled.contains_key(&ProviderId::Anthropic));
        assert!(!compiled.contains_key(&ProviderId::Azure));
    }

    #[tokio::test]
    async fn test_compile_all_isolates_proxy_failure() {
        let settings = settings_with(anthropic_connected())
            .with_entry(azure_connected(AzureAuthMethod::ApiKey));
        let secrets = FakeSecrets::default()
            .with(ProviderId::Anthropic, "sk-ant-key")
            .with(ProviderId::Azure, "azure-key");
        let proxy = FakeProxy::failing();

        let compiled = compile_all(&settings, &secrets, Some(&proxy)).await;

        assert!(compiled.contains_key(&ProviderId::Anthropic));
        assert!(!compiled.contains_key(&ProviderId::Azure));
        assert_eq!(proxy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_compile_all_with_working_proxy() {
        let settings = settings_with(anthropic_connected())
            .with_entry(azure_connected(AzureAuthMethod::ApiKey));
        let secrets = FakeSecrets::default()
            .with(ProviderId::Anthropic, "sk-ant-key")
            .with(ProviderId::Azure, "azure-key");
        let proxy = FakeProxy::new();

        let compiled = compile_all(&settings, &secrets, Some(&proxy)).await;

        assert_eq!(compiled.len(), 2);
        let azure = &compiled[&ProviderId::Azure];
        assert_eq!(
            azure.connection_options.base_url,
            "http://127.0.0.1:8411"
        );
    }
}
