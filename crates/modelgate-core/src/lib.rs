//! Modelgate core library
//!
//! The provider configuration broker sitting between the settings store and
//! the downstream agent runtime:
//!
//! - [`validate`] — credential-validation strategies, one per provider
//!   family, probing a backend's live API with a bounded timeout.
//! - [`compile`] — per-provider adapters turning stored settings plus a
//!   secret lookup (and, for gateway providers, a proxy-lifecycle
//!   collaborator) into normalized runtime configuration entries.
//! - [`sidecar`] — argv resolution for auxiliary tool servers, switching
//!   between precompiled artifacts and interpreted source per deployment
//!   state.

pub mod compile;
pub mod error;
pub mod provider;
pub mod sidecar;
pub mod validate;

// Re-export commonly used types
pub use compile::{
    compile, compile_all, ConnectionOptions, ModelConfig, ProviderAdapter, ProxyBroker,
    ProxyEndpoint, RuntimeConfig, RuntimeConfigFile, SecretStore, TokenLimit,
};
pub use error::{GateError, GateResult};
pub use provider::{
    ConnectedProvider, ConnectionStatus, CredentialKind, Credentials, ModelEntry, ProviderId,
    ProviderSettings, ToolSupport,
};
pub use sidecar::{resolve_interpreter, resolve_server_command, DeploymentEnvironment};
pub use validate::{validate_key, HttpProbe, ReqwestProbe, ValidationResult};
