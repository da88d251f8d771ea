//! Service configuration file parsing.
//!
//! The file is JSON unless its extension is `.toml`; both formats share
//! the same key layout.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::network::InterfaceSelector;

use super::{ConfigError, defaults};

/// Root structure of the service configuration file.
///
/// Every key is optional; missing keys take their documented defaults.
/// Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging section
    pub logs: LogsSection,

    /// Seconds between checks
    pub check_interval: i64,

    /// Seconds after which unchanged state is re-announced; zero or less disables
    pub repost_interval: i64,

    /// Notify on every check
    pub force: bool,

    /// Path of the state file
    pub ip_store_file: PathBuf,

    /// `"all"`, one interface name, or a list of names
    pub interfaces_of_interest: InterfaceSelector,

    /// Include the OS interface index when comparing adapters
    pub compare_index: bool,

    /// Require every webhook to accept a notification
    pub require_all_services: bool,

    /// Per-request webhook timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            logs: LogsSection::default(),
            check_interval: defaults::CHECK_INTERVAL_SECS,
            repost_interval: defaults::REPOST_INTERVAL_SECS,
            force: false,
            ip_store_file: PathBuf::from(defaults::IP_STORE_FILE),
            interfaces_of_interest: InterfaceSelector::default(),
            compare_index: false,
            require_all_services: true,
            request_timeout: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

/// The `logs` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogsSection {
    /// Log level name
    pub level: String,

    /// Directory receiving the log file; created if absent
    pub log_directory: PathBuf,
}

impl Default for LogsSection {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            log_directory: PathBuf::from(defaults::LOG_DIRECTORY),
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. A missing
    /// file is an error; there is no built-in fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if is_toml(path) {
            Self::parse_toml(&content, path)
        } else {
            Self::parse_json(&content, path)
        }
    }

    /// Parses configuration from a JSON string. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or has unknown keys.
    pub fn parse_json(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses configuration from a TOML string. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown keys.
    pub fn parse_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
