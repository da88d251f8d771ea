//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration or secrets file.
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be parsed.
    #[error("Failed to parse JSON in '{}': {source}", path.display())]
    JsonParse {
        /// Path to the file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A TOML file could not be parsed.
    #[error("Failed to parse TOML in '{}': {source}", path.display())]
    TomlParse {
        /// Path to the file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Unrecognised log level.
    #[error(
        "Invalid log level '{value}': expected TRACE, DEBUG, INFO, SUCCESS, WARNING, ERROR or CRITICAL"
    )]
    InvalidLogLevel {
        /// The value provided
        value: String,
    },

    /// An entry of `interfaces_of_interest` is empty.
    #[error("interfaces_of_interest contains an empty interface name")]
    EmptyInterfaceName,

    /// A webhook URL in the secrets file is not a valid URL.
    ///
    /// The URL itself is left out; it carries the webhook credentials.
    #[error("Invalid {key}: {reason}")]
    InvalidUrl {
        /// Secrets key holding the URL
        key: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The secrets file names no notification destination.
    #[error("No webhook URL found in '{}'", path.display())]
    NoDestinations {
        /// Path to the secrets file
        path: PathBuf,
    },
}
