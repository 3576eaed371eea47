//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Transport errors
///
/// Only connection-level failures end up here. A response with any status
/// code, including 4xx and 5xx, is a successful send.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),

    /// Failure reported by a custom transport implementation
    #[error("Transport I/O failure: {0}")]
    Io(String),
}

impl HttpError {
    /// Whether the failure happened before any bytes reached the server
    pub fn is_connect(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_connect() || e.is_builder(),
            HttpError::InvalidUrl(_) | HttpError::InvalidProxy(_) | HttpError::BuildError(_) => {
                true
            }
            HttpError::Io(_) => false,
        }
    }
}
