//! Host name lookup.

use thiserror::Error;

/// Error type for host name lookups.
#[derive(Debug, Error)]
pub enum HostnameError {
    /// The OS call failed.
    #[error("Failed to get system hostname: {0}")]
    Lookup(#[source] std::io::Error),

    /// The host name is not valid UTF-8.
    #[error("System hostname is not valid UTF-8: {0}")]
    NotUnicode(String),
}

/// Source of the current host name.
///
/// Injected into the poller so tests can simulate a renamed host.
pub trait HostnameSource: Send + Sync {
    /// Returns the current host name.
    ///
    /// # Errors
    ///
    /// Returns [`HostnameError`] if the name cannot be read.
    fn hostname(&self) -> Result<String, HostnameError>;
}

/// Host name as reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> Result<String, HostnameError> {
        ::hostname::get()
            .map_err(HostnameError::Lookup)?
            .into_string()
            .map_err(|raw| HostnameError::NotUnicode(raw.to_string_lossy().into_owned()))
    }
}
