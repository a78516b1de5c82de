//! Modelgate diagnostic CLI
//!
//! Thin surface over `modelgate-core` for operating the broker by hand:
//! validate a credential, compile the runtime configuration file, or inspect
//! sidecar launch commands.

mod args;
mod commands;

use clap::Parser;
use modelgate_core::error::GateResult;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> GateResult<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::run(cli.command).await
}
