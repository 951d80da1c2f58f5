//! Layered configuration for the `coda` binary.
//!
//! Later layers win: the TOML compiled into the binary, then
//! `config/default`, `config/$CODA_ENV` and `config/local` from the working
//! directory, then `CODA_*` variables such as
//! `CODA_MEMORY__RETRIEVAL__TOP_K=8`. The merged result must pass
//! `MemoryConfig::validate` before any command runs.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

/// Defaults compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

const ENV_PREFIX: &str = "CODA";
const DEFAULT_PROFILE: &str = "development";

/// Load the full layer stack and validate it.
pub fn load_config() -> Result<AppConfig> {
    let profile = std::env::var("CODA_ENV").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
    let builder = file_layers(embedded(), &profile).add_source(
        // Single `_` after the prefix, `__` between nested keys
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    finish(builder)
}

fn embedded() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn file_layers(builder: ConfigBuilder<DefaultState>, profile: &str) -> ConfigBuilder<DefaultState> {
    ["default", profile, "local"]
        .into_iter()
        .fold(builder, |builder, name| {
            builder.add_source(File::with_name(&format!("config/{name}")).required(false))
        })
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig> {
    let app: AppConfig = builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;
    app.memory
        .validate()
        .context("Invalid memory configuration")?;
    Ok(app)
}
