//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Messengers turn these into a failed delivery; nothing is retried
/// until the next poll tick.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}
