// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `REPOPULSE_*` environment variables. CLI flags are applied last by the
//! commands themselves.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment prefix for overrides (`REPOPULSE_API_URL`, ...)
pub const ENV_PREFIX: &str = "REPOPULSE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the repository API
    pub api_url: String,
    /// Bearer token for authenticated requests
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header (GitHub rejects requests without one)
    pub user_agent: String,
    /// How many top contributors to list
    pub contributor_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: 30,
            user_agent: format!("repopulse/{}", env!("CARGO_PKG_VERSION")),
            contributor_limit: 5,
        }
    }
}

impl Config {
    /// Copy with the token replaced by a placeholder, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            token: self.token.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }

    /// Apply a token given on the command line. It wins over the file and
    /// `REPOPULSE_TOKEN`; `None` keeps the loaded value.
    #[must_use]
    pub fn with_token_override(self, token: Option<String>) -> Self {
        match token {
            Some(token) => Self {
                token: Some(token),
                ..self
            },
            None => self,
        }
    }
}

/// Default config file location (`<config dir>/repopulse/config.toml`)
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "repopulse")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = ::config::Config::builder();

    match path {
        Some(p) => {
            builder = builder.add_source(::config::File::from(p).required(true));
        }
        None => {
            if let Some(p) = default_path() {
                builder = builder.add_source(::config::File::from(p).required(false));
            }
        }
    }

    let settings = builder
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read configuration")?;

    settings
        .try_deserialize::<Config>()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that read or write `REPOPULSE_*` variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const LAYERED_VARS: [&str; 3] = [
        "REPOPULSE_TIMEOUT_SECS",
        "REPOPULSE_TOKEN",
        "REPOPULSE_CONTRIBUTOR_LIMIT",
    ];

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.contributor_limit, 5);
        assert!(config.user_agent.starts_with("repopulse/"));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"http://localhost:9999\"\ntimeout_secs = 5\n");

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.contributor_limit, 5);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_redacted_hides_token() {
        let config = Config {
            token: Some("ghp_secret".into()),
            ..Config::default()
        };
        let shown = config.redacted();
        assert_eq!(shown.token.as_deref(), Some("<redacted>"));
        assert_eq!(shown.api_url, config.api_url);
        assert!(Config::default().redacted().token.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "timeout_secs = 5\ntoken = \"from-file\"\n");

        std::env::set_var("REPOPULSE_TIMEOUT_SECS", "7");
        std::env::set_var("REPOPULSE_TOKEN", "from-env");
        std::env::set_var("REPOPULSE_CONTRIBUTOR_LIMIT", "2");
        let loaded = load(Some(&path));
        for var in LAYERED_VARS {
            std::env::remove_var(var);
        }

        let config = loaded.unwrap();
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.token.as_deref(), Some("from-env"));
        assert_eq!(config.contributor_limit, 2);
    }

    #[test]
    fn test_token_override() {
        let config = Config {
            token: Some("from-file".into()),
            ..Config::default()
        };
        let flagged = config.clone().with_token_override(Some("from-flag".into()));
        assert_eq!(flagged.token.as_deref(), Some("from-flag"));
        assert_eq!(flagged.timeout_secs, config.timeout_secs);

        let kept = config.with_token_override(None);
        assert_eq!(kept.token.as_deref(), Some("from-file"));
    }
}
