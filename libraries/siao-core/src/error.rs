/// Core error types for SiaoPlay
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for SiaoPlay
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A URL setting is malformed
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl {
        /// Name of the offending setting
        field: String,
        /// The rejected value
        value: String,
    },
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
