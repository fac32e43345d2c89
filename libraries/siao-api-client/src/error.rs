//! Error types for the content API client.

use thiserror::Error;

/// Errors that can occur when talking to the content API.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The session token was missing, expired or revoked
    #[error("Authentication required")]
    AuthRequired,

    /// Login was refused
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Access denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The API answered with `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// No response at all (connection refused, DNS, timeout)
    #[error("API unreachable: {0}")]
    Unreachable(String),

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiClientError {
    /// Map a transport failure, separating "no response" from other errors
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ApiClientError::Unreachable(e.to_string())
        } else {
            ApiClientError::Request(e)
        }
    }
}

/// Result type for content API operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
