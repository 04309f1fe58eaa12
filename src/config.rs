//! Console configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_STORAGE_PATH: &str = ".vpn-panel/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub timeouts: Timeouts,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            timeouts: Timeouts::default(),
        }
    }
}

impl PanelConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PANEL_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `PANEL_STORAGE_PATH`: default `.vpn-panel/session.json`
    /// - `PANEL_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PANEL_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is set but is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            &lookup("PANEL_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
        );
        let storage_path = lookup("PANEL_STORAGE_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: parse_secs(&lookup, "PANEL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_secs(&lookup, "PANEL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { api_base_url, storage_path, timeouts })
    }
}

/// Trim whitespace and trailing slashes so paths can be appended directly.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Parse(format!("{key} must be greater than zero"))),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError::Parse(format!("{key} is not a number: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
