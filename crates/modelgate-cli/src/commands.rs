//! Command implementations for the diagnostic CLI

use crate::args::Commands;
use modelgate_core::compile::SecretStore;
use modelgate_core::error::{GateError, GateResult};
use modelgate_core::provider::{ProviderId, ProviderSettings};
use modelgate_core::sidecar::{self, DeploymentEnvironment};
use modelgate_core::validate::{validate_key, ReqwestProbe};
use modelgate_core::RuntimeConfigFile;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Secret lookup backed by `MODELGATE_<PROVIDER>_API_KEY` environment
/// variables.
///
/// A stand-in for the OS credential store the desktop shell uses; good enough
/// for diagnostics and CI.
pub struct EnvSecrets;

impl SecretStore for EnvSecrets {
    fn api_key(&self, provider: ProviderId) -> Option<String> {
        let var = format!(
            "MODELGATE_{}_API_KEY",
            provider.as_str().to_uppercase().replace('-', "_")
        );
        std::env::var(var).ok()
    }
}

/// Dispatch one parsed command
pub async fn run(command: Commands) -> GateResult<()> {
    match command {
        Commands::Validate {
            provider,
            key,
            timeout_secs,
        } => validate(provider, key, timeout_secs).await,
        Commands::Compile { settings, output } => compile(settings, output).await,
        Commands::Sidecar {
            tools_root,
            resources,
            packaged,
            server,
            source,
            compiled,
        } => resolve_sidecar(tools_root, resources, packaged, server, source, compiled).await,
    }
}

async fn validate(provider: String, key: Option<String>, timeout_secs: u64) -> GateResult<()> {
    let provider = ProviderId::parse(&provider)
        .ok_or_else(|| GateError::config(format!("unknown provider '{provider}'")))?;
    let key = match key.or_else(|| EnvSecrets.api_key(provider)) {
        Some(key) => key,
        None => return Err(GateError::config("no key given and none in the environment")),
    };

    let probe = ReqwestProbe::new();
    let result = validate_key(
        provider,
        &key,
        Duration::from_secs(timeout_secs),
        &probe,
    )
    .await;

    if result.valid {
        println!("{provider}: valid");
        Ok(())
    } else {
        println!(
            "{provider}: invalid ({})",
            result.error.as_deref().unwrap_or("unknown reason")
        );
        std::process::exit(1);
    }
}

async fn compile(settings_path: PathBuf, output: Option<PathBuf>) -> GateResult<()> {
    let raw = std::fs::read_to_string(&settings_path)?;
    let settings: ProviderSettings = serde_json::from_str(&raw)?;

    // No proxy broker here: proxy-dependent providers are skipped, the same
    // way the runtime behaves when the proxy capability is absent.
    let compiled = modelgate_core::compile_all(&settings, &EnvSecrets, None).await;
    info!(providers = compiled.len(), "compiled runtime configuration");

    let file = RuntimeConfigFile::from_compiled(compiled);
    let json = serde_json::to_string_pretty(&file)?;
    match output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

async fn resolve_sidecar(
    tools_root: PathBuf,
    resources: Option<PathBuf>,
    packaged: bool,
    server: Option<String>,
    source: Option<PathBuf>,
    compiled: Option<PathBuf>,
) -> GateResult<()> {
    let resources = resources.unwrap_or_else(|| tools_root.join("runtime"));
    let deploy = DeploymentEnvironment::detect(packaged, resources);

    let interpreter = sidecar::resolve_interpreter(&deploy, &tools_root).await;
    println!("interpreter: {}", interpreter.join(" "));

    if let (Some(server), Some(source), Some(compiled)) = (server, source, compiled) {
        let argv = sidecar::resolve_server_command(
            &deploy,
            &interpreter,
            &tools_root,
            &server,
            &source,
            &compiled,
        )
        .await;
        println!("{server}: {}", argv.join(" "));
    }
    Ok(())
}
