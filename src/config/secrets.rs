//! Secrets file holding the webhook URLs.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use super::ConfigError;

/// A supported notification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Slack workflow webhook
    Slack,
    /// Discord channel webhook
    Discord,
}

impl Service {
    /// The secrets file key holding this backend's URL.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Slack => "slack_webhook_url",
            Self::Discord => "discord_webhook_url",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slack => "slack",
            Self::Discord => "discord",
        })
    }
}

/// One backend named in the secrets file.
#[derive(Clone, PartialEq, Eq)]
pub struct Destination {
    /// The backend.
    pub service: Service,
    /// The webhook URL; `None` when the key is present but empty.
    pub url: Option<Url>,
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("service", &self.service)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Deserialize)]
struct SecretsFile {
    slack_webhook_url: Option<String>,
    discord_webhook_url: Option<String>,
}

/// Validated secrets: the backends to register, in a fixed order.
///
/// URLs embed credentials, so neither `Debug` nor `Display` prints them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    destinations: Vec<Destination>,
}

impl Secrets {
    /// Loads and validates the secrets file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, a URL is
    /// invalid, or no backend key is present.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses secrets from a JSON string. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: SecretsFile =
            serde_json::from_str(content).map_err(|e| ConfigError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut destinations = Vec::new();
        for (service, raw) in [
            (Service::Slack, file.slack_webhook_url),
            (Service::Discord, file.discord_webhook_url),
        ] {
            if let Some(raw) = raw {
                destinations.push(Destination {
                    service,
                    url: parse_endpoint(service, &raw)?,
                });
            }
        }

        if destinations.is_empty() {
            return Err(ConfigError::NoDestinations {
                path: PathBuf::from(path),
            });
        }

        Ok(Self { destinations })
    }

    /// The backends to register, Slack first.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }
}

impl fmt::Display for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .destinations
            .iter()
            .map(|d| match d.url {
                Some(_) => d.service.to_string(),
                None => format!("{} (no URL)", d.service),
            })
            .collect();
        write!(f, "[{}]", names.join(", "))
    }
}

fn parse_endpoint(service: Service, raw: &str) -> Result<Option<Url>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        tracing::warn!("{} is empty, {service} notifications will fail", service.key());
        return Ok(None);
    }

    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key: service.key(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key: service.key(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    Ok(Some(url))
}
