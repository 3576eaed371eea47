//! Client error types

use abicart_http::HttpError;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
///
/// A 404 is not an error: it maps to [`crate::ApiResult::Absent`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, surfaced as-is and never retried
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// Request body could not be serialized; nothing was sent
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// 200 response body is not a JSON document
    #[error("Failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the server was reached before the failure
    pub fn reached_server(&self) -> bool {
        matches!(self, ClientError::Parse(_))
    }
}
