//! Store configuration.

use std::path::PathBuf;

use serde::Deserialize;

pub const ENV_HISTORY_LIMIT: &str = "STOCKTRADER_HISTORY_LIMIT";
pub const ENV_STOCKS_FILE: &str = "STOCKTRADER_STOCKS_FILE";
pub const ENV_JSON_LOGS: &str = "STOCKTRADER_JSON_LOGS";

/// Runtime knobs for a store and the binary hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum mutation records kept in history (0 disables history).
    pub history_limit: usize,
    /// JSON file to read the default stock list from; built-in list if unset.
    pub stocks_file: Option<PathBuf>,
    /// Emit JSON logs (otherwise compact text).
    pub json_logs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: 1024,
            stocks_file: None,
            json_logs: true,
        }
    }
}

impl StoreConfig {
    /// Read configuration from `STOCKTRADER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read only the log format flag from the environment.
    ///
    /// Logging is not up yet when this runs, so invalid values fall back to
    /// the default silently; `from_env` reports them once tracing is installed.
    pub fn json_logs_from_env() -> bool {
        Self::json_logs_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn json_logs_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> bool {
        lookup(ENV_JSON_LOGS)
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(Self::default().json_logs)
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HISTORY_LIMIT) {
            match raw.trim().parse() {
                Ok(limit) => config.history_limit = limit,
                Err(_) => tracing::warn!(
                    key = ENV_HISTORY_LIMIT,
                    value = %raw,
                    fallback = config.history_limit,
                    "history limit is not a number; using default"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_STOCKS_FILE) {
            if !raw.trim().is_empty() {
                config.stocks_file = Some(PathBuf::from(raw));
            }
        }

        if let Some(raw) = lookup(ENV_JSON_LOGS) {
            match parse_flag(&raw) {
                Some(json) => config.json_logs = json,
                None => tracing::warn!(
                    key = ENV_JSON_LOGS,
                    value = %raw,
                    "log format flag is not a boolean; using default"
                ),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
