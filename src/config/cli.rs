//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::Parser;

use super::defaults;

/// IP Poster: announce a host's addresses to chat webhooks
///
/// Polls the host's network interfaces and posts the host name and
/// addresses to Slack and/or Discord whenever they change.
#[derive(Debug, Parser)]
#[command(name = "ip-poster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the service configuration file (JSON, or TOML by extension)
    #[arg(long, default_value = defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the secrets file holding the webhook URLs
    #[arg(long, default_value = defaults::SECRETS_FILE)]
    pub secrets: PathBuf,

    /// Notify on every check, even without changes
    #[arg(long)]
    pub force: bool,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
