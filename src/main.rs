//! Coda - memory operator CLI
//!
//! Loads configuration, installs logging and runs one maintenance command
//! against a saved memory session.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod config;
mod loader;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = loader::load_config()?;
    let _log_guard = logging::init(&config.log);

    debug!("Starting Coda v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli, config).await
}
