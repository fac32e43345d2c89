//! Error types for playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The media element could not load or play the current track
    #[error("Media load failed: {0}")]
    MediaLoad(String),

    /// Seek target is negative or not a number
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// The player driver task has stopped
    #[error("Player driver closed")]
    DriverClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
