//! Error types for calls to the chat service.

use thiserror::Error;

/// Chat service error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// The service answered, but reported an application-level failure.
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        /// The `status` field of the payload.
        status: String,
        /// The `error` field of the payload.
        message: String,
    },
}

impl ApiError {
    /// True when the failure came from the transport rather than the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::InvalidUrl(_))
    }
}

/// Result type alias for chat service operations.
pub type Result<T> = std::result::Result<T, ApiError>;
