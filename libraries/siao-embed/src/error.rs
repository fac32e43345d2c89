//! Error types for embed resolution.

use thiserror::Error;

/// Errors produced while resolving an embed URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No provider recognised the URL
    #[error("Unsupported video URL: {url}")]
    Unsupported { url: String },
}

/// Result type for embed resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
