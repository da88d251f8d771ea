//! Error types for the monitor layer.

use thiserror::Error;

use crate::network::{FetchError, HostnameError};
use crate::state::StateError;

/// Error type for observing the host or initializing state.
///
/// During a tick these are logged and the tick is skipped; during
/// [`Poller::bootstrap`](super::Poller::bootstrap) they are fatal.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Failed to enumerate network interfaces.
    #[error("Failed to fetch addresses: {0}")]
    Fetch(#[from] FetchError),

    /// Failed to read the host name.
    #[error(transparent)]
    Hostname(#[from] HostnameError),

    /// Failed to write the initial state file.
    #[error("Failed to initialize state: {0}")]
    StateInit(#[source] StateError),
}
