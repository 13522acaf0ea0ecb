//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_CONTENT_CHARS, DEFAULT_PORT};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for snipbin.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Directory for the durable backend. `None` selects the in-memory store.
    pub db_path: Option<String>,
    pub max_content_chars: usize,
}

/// Store backend selected by the configuration.
///
/// The choice is made exactly once at startup; nothing downstream
/// re-inspects the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-lifetime in-memory store.
    Memory,
    /// Durable redb store rooted at this directory.
    Redb(PathBuf),
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            db_path: env::var("DB_PATH")
                .ok()
                .map(expand_tilde)
                .filter(|p| !p.trim().is_empty()),
            max_content_chars: env::var("MAX_CONTENT_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_CHARS),
        }
    }

    /// Resolve the store backend for this configuration.
    pub fn backend(&self) -> StoreBackend {
        match &self.db_path {
            Some(path) => StoreBackend::Redb(PathBuf::from(path)),
            None => StoreBackend::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_env_flag, Config, StoreBackend};
    use std::path::PathBuf;

    fn config_with_db_path(db_path: Option<&str>) -> Config {
        Config {
            port: 0,
            db_path: db_path.map(str::to_string),
            max_content_chars: 1024,
        }
    }

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn backend_selection_follows_db_path_presence() {
        assert_eq!(config_with_db_path(None).backend(), StoreBackend::Memory);
        assert_eq!(
            config_with_db_path(Some("/tmp/snipbin-db")).backend(),
            StoreBackend::Redb(PathBuf::from("/tmp/snipbin-db"))
        );
    }
}
