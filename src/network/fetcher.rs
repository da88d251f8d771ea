//! The OS query seam and its errors.

use super::AdapterSnapshot;
use thiserror::Error;

/// Why the host's interfaces could not be listed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// `GetAdaptersAddresses` reported an error.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// An OS call failed with an I/O error (e.g. `getifaddrs`).
    #[error("Interface query failed: {0}")]
    Io(#[from] std::io::Error),

    /// The OS refused to list interfaces.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// The call that was refused.
        context: String,
    },

    /// Any other platform failure.
    #[error("Platform error: {message}")]
    Platform {
        /// Description of the failure.
        message: String,
    },
}

impl FetchError {
    /// Classifies an OS error from the call named by `context`.
    #[must_use]
    pub fn os_error(context: &str, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                context: format!("{context}: {error}"),
            }
        } else {
            Self::Io(error)
        }
    }
}

/// Lists every network adapter on the host.
///
/// Production code uses the [`platform`](super::platform) fetcher; tests
/// hand back canned adapter lists.
pub trait AddressFetcher: Send + Sync {
    /// Returns all adapters, including ones without addresses.
    ///
    /// Addresses keep the order the OS reports them in, since that order
    /// takes part in change detection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the OS query fails or access is denied.
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError>;
}
