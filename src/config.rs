//! Client configuration.
//!
//! Resolution order: built-in defaults, then the optional JSON file at
//! `~/.config/carebook/config.json`, then `CAREBOOK_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Carebook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MESSAGE_TTL_SECS: u64 = 3;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "carebook=info,carebook_lib=info,reqwest=warn"
}

/// Get the configuration directory (`<config_dir>/carebook`).
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carebook"))
}

/// Default configuration file path.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// How settlements of superseded list fetches are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Only the most recently issued request of a kind may settle into state.
    #[default]
    LatestIssued,
    /// Whichever response arrives last wins.
    LastResolved,
}

impl StalePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LatestIssued => "latest-issued",
            Self::LastResolved => "last-resolved",
        }
    }
}

impl std::str::FromStr for StalePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest-issued" => Ok(Self::LatestIssued),
            "last-resolved" => Ok(Self::LastResolved),
            other => Err(ConfigError::InvalidValue {
                key: "stale_policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Runtime configuration for the client core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub stale_policy: StalePolicy,
    /// Delay before transient error/success messages are cleared.
    pub message_ttl_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            stale_policy: StalePolicy::default(),
            message_ttl_secs: DEFAULT_MESSAGE_TTL_SECS,
        }
    }
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

impl ClientConfig {
    /// Load defaults, the user config file (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Apply `CAREBOOK_*` overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CAREBOOK_API_URL") {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("CAREBOOK_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_secs("request_timeout_secs", &secs)?;
        }
        if let Some(policy) = lookup("CAREBOOK_STALE_POLICY") {
            self.stale_policy = policy.parse()?;
        }
        if let Some(secs) = lookup("CAREBOOK_MESSAGE_TTL_SECS") {
            self.message_ttl_secs = parse_secs("message_ttl_secs", &secs)?;
        }
        Ok(())
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
