//! Application configuration types

use coda_memory::MemoryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Session directory; `~/` is expanded
    #[serde(default)]
    pub session_dir: Option<String>,
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
    /// Also write a daily rolling log file here
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_filter() -> String {
    "coda=info,coda_memory=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
            directory: None,
        }
    }
}

impl AppConfig {
    /// Resolve the session directory: CLI override, then config, then the
    /// platform data directory.
    pub fn session_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(path) = cli_override {
            return path;
        }
        if let Some(dir) = &self.session_dir {
            return expand_home(dir);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coda")
            .join("session")
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_precedence() {
        let mut config = AppConfig::default();
        let cli = PathBuf::from("/tmp/cli-session");
        assert_eq!(config.session_path(Some(cli.clone())), cli);

        config.session_dir = Some("/srv/coda".into());
        assert_eq!(config.session_path(None), PathBuf::from("/srv/coda"));

        config.session_dir = None;
        assert!(config.session_path(None).ends_with("coda/session"));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/coda"), home.join("coda"));
        }
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
    }
}
