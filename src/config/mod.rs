//! Configuration layer for IP Poster.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - Service configuration file parsing ([`ServiceConfig`])
//! - Secrets file parsing ([`Secrets`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Sources
//!
//! The service configuration file is required; keys it omits take the
//! defaults in [`defaults`]. The CLI only selects the files and adds the
//! `--force`, `--once` and `--verbose` switches. `--force` is OR'd with the
//! file's `force` key, so the CLI can enable but never disable it.
//!
//! The secrets file is kept separate so the service configuration can be
//! shared without leaking webhook URLs.

mod cli;
pub mod defaults;
mod error;
mod file;
mod level;
mod secrets;
mod validated;

#[cfg(test)]
mod file_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::Cli;
pub use error::ConfigError;
pub use file::{LogsSection, ServiceConfig};
pub use level::LogLevel;
pub use secrets::{Destination, Secrets, Service};
pub use validated::ValidatedConfig;
