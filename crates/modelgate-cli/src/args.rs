//! Command-line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Provider configuration broker for the agent runtime
#[derive(Parser, Debug)]
#[command(name = "modelgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a provider credential against its live API
    Validate {
        /// Provider id (e.g. "anthropic", "openai")
        provider: String,
        /// The raw key; falls back to MODELGATE_<PROVIDER>_API_KEY
        #[arg(long)]
        key: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },

    /// Compile the runtime configuration file from stored settings
    Compile {
        /// Path to the provider settings JSON file
        #[arg(long)]
        settings: PathBuf,
        /// Where to write the compiled configuration (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Resolve sidecar launch commands for a tools directory
    Sidecar {
        /// Root directory containing the sidecar packages
        #[arg(long)]
        tools_root: PathBuf,
        /// Directory carrying the bundled runtime binary
        #[arg(long)]
        resources: Option<PathBuf>,
        /// Treat the environment as a packaged build
        #[arg(long)]
        packaged: bool,
        /// Server name to resolve a launch command for
        #[arg(long)]
        server: Option<String>,
        /// Source entry point, relative to the tools root
        #[arg(long, requires = "server")]
        source: Option<PathBuf>,
        /// Precompiled artifact path, relative to the tools root
        #[arg(long, requires = "server")]
        compiled: Option<PathBuf>,
    },
}
