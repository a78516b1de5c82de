//! Sidecar command resolution
//!
//! Decides how to launch each auxiliary tool server: a vendored interpreter
//! over the source tree during development, or the bundled runtime binary
//! with a precompiled artifact in packaged builds. The resolver only produces
//! argv arrays; spawning happens outside this crate.

mod env;

pub use env::{DeploymentEnvironment, OsFamily, FORCE_BUNDLED_ENV};

use std::path::Path;
use tracing::{debug, warn};

/// Sidecar packages known to vendor the interpreter under their own
/// `node_modules`, probed in order.
const ANCHOR_PACKAGES: &[&str] = &["permission-server", "browser-server"];

/// Resolve the argv used to invoke the sidecar interpreter
///
/// Probes each anchor package for a locally installed interpreter binary;
/// the first existing candidate wins. When none is present we fall back to
/// the system package runner, which always works but pays its resolution
/// cost on every launch.
pub async fn resolve_interpreter(
    deploy: &DeploymentEnvironment,
    tools_root: &Path,
) -> Vec<String> {
    for anchor in ANCHOR_PACKAGES {
        let candidate = tools_root
            .join(anchor)
            .join("node_modules")
            .join(".bin")
            .join(deploy.interpreter_binary());
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            debug!(anchor, path = %candidate.display(), "using vendored interpreter");
            return vec![candidate.to_string_lossy().into_owned()];
        }
    }

    warn!(
        tools_root = %tools_root.display(),
        "no vendored interpreter found, falling back to the package runner"
    );
    vec!["npx".to_string(), "bun".to_string()]
}

/// Resolve the launch argv for one tool server
///
/// Recomputed per server: during iterative development individual sidecars
/// may be built or unbuilt independently, so the precompiled-artifact check
/// must never be cached across servers.
pub async fn resolve_server_command(
    deploy: &DeploymentEnvironment,
    interpreter: &[String],
    tools_root: &Path,
    server_name: &str,
    source_rel: &Path,
    compiled_rel: &Path,
) -> Vec<String> {
    if deploy.bundled_sidecars() {
        let artifact = tools_root.join(compiled_rel);
        if tokio::fs::try_exists(&artifact).await.unwrap_or(false) {
            debug!(server = server_name, artifact = %artifact.display(), "launching precompiled sidecar");
            return vec![
                deploy.bundled_runtime().to_string_lossy().into_owned(),
                artifact.to_string_lossy().into_owned(),
            ];
        }
        debug!(
            server = server_name,
            "no precompiled artifact, falling back to source"
        );
    }

    let mut argv: Vec<String> = interpreter.to_vec();
    argv.push(tools_root.join(source_rel).to_string_lossy().into_owned());
    argv
}
