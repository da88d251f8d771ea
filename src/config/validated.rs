//! Validated configuration after merging CLI and file sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::monitor::PollOptions;
use crate::network::{AddressFetcher, FetchError, InterfaceSelector, InterfaceSet};

use super::cli::Cli;
use super::error::ConfigError;
use super::file::ServiceConfig;
use super::level::LogLevel;

/// Fully validated configuration ready for use by the application.
///
/// Use [`ValidatedConfig::load`] to read the configuration file named on
/// the command line, or [`ValidatedConfig::from_raw`] with an already
/// parsed file.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Log verbosity from the file
    pub log_level: LogLevel,

    /// Directory receiving the log file
    pub log_directory: PathBuf,

    /// Time between checks
    pub check_interval: Duration,

    /// Re-announce unchanged state after this long; `None` disables
    pub repost_interval: Option<Duration>,

    /// Notify on every check (file and CLI flags OR'd)
    pub force: bool,

    /// Path of the state file
    pub ip_store_file: PathBuf,

    /// Interfaces to monitor, resolved once at startup
    pub interfaces: InterfaceSelector,

    /// Include the OS interface index when comparing adapters
    pub compare_index: bool,

    /// Require every webhook to accept a notification
    pub require_all_services: bool,

    /// Per-request webhook timeout
    pub request_timeout: Duration,

    /// Path of the secrets file
    pub secrets_file: PathBuf,

    /// Run a single check and exit
    pub once: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repost = self
            .repost_interval
            .map_or_else(|| "disabled".to_string(), |d| format!("{}s", d.as_secs()));

        write!(
            f,
            "Config {{ check_interval: {}s, repost_interval: {repost}, force: {}, \
             interfaces: {}, ip_store_file: {}, log_level: {}, log_directory: {}, \
             compare_index: {}, require_all_services: {}, request_timeout: {}s, once: {} }}",
            self.check_interval.as_secs(),
            self.force,
            self.interfaces,
            self.ip_store_file.display(),
            self.log_level,
            self.log_directory.display(),
            self.compare_index,
            self.require_all_services,
            self.request_timeout.as_secs(),
            self.once,
        )
    }
}

impl ValidatedConfig {
    /// Loads the configuration file named by `--config` and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed, or invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = ServiceConfig::load(&cli.config)?;
        Self::from_raw(cli, file)
    }

    /// Creates a validated configuration from CLI arguments and a parsed file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `check_interval` or `request_timeout` is not positive
    /// - the log level is not recognised
    /// - an interface name is empty
    pub fn from_raw(cli: &Cli, file: ServiceConfig) -> Result<Self, ConfigError> {
        let log_level = file.logs.level.parse::<LogLevel>()?;
        let check_interval = positive_secs("check_interval", file.check_interval)?;
        let repost_interval = u64::try_from(file.repost_interval)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        if file.request_timeout == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "request_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        if file
            .interfaces_of_interest
            .names()
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigError::EmptyInterfaceName);
        }

        Ok(Self {
            log_level,
            log_directory: file.logs.log_directory,
            check_interval,
            repost_interval,
            force: cli.force || file.force,
            ip_store_file: file.ip_store_file,
            interfaces: file.interfaces_of_interest,
            compare_index: file.compare_index,
            require_all_services: file.require_all_services,
            request_timeout: Duration::from_secs(file.request_timeout),
            secrets_file: cli.secrets.clone(),
            once: cli.once,
            verbose: cli.verbose,
        })
    }

    /// The level the logger should use; `--verbose` forces DEBUG.
    #[must_use]
    pub fn effective_log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.log_level.into()
        }
    }

    /// The notification policy for the poller.
    #[must_use]
    pub const fn poll_options(&self) -> PollOptions {
        PollOptions {
            repost_interval: self.repost_interval,
            force: self.force,
            compare_index: self.compare_index,
            require_all_services: self.require_all_services,
        }
    }

    /// Resolves the interface selector into the set to monitor.
    ///
    /// Only `"all"` queries the host; explicit names are taken as given.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error if the host cannot be queried.
    pub fn resolve_interfaces<F>(&self, fetcher: &F) -> Result<InterfaceSet, FetchError>
    where
        F: AddressFetcher + ?Sized,
    {
        match self.interfaces {
            InterfaceSelector::All => Ok(self.interfaces.resolve(&fetcher.fetch()?)),
            InterfaceSelector::Named(_) | InterfaceSelector::List(_) => {
                Ok(self.interfaces.resolve(&[]))
            }
        }
    }
}

fn positive_secs(field: &'static str, secs: i64) -> Result<Duration, ConfigError> {
    match u64::try_from(secs) {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidDuration {
            field,
            reason: format!("must be greater than zero, got {secs}"),
        }),
    }
}
