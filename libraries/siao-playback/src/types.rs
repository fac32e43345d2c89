//! Core types for playback

use serde::{Deserialize, Serialize};
use siao_core::config::PlaybackSettings;
use siao_core::Track;
use std::time::Duration;

/// Observable playback state, derived from the machine's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track list
    Uninitialized,

    /// Current track is loading
    Loading,

    /// Currently playing
    Playing,

    /// Loaded but not playing
    Paused,

    /// Last track of the list finished
    Ended,
}

/// Playback progress in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub position: f64,

    /// `0` until the media element reports a duration
    pub duration: f64,
}

/// Configuration for the playback machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Start the first track once it is loaded (default: false)
    pub autoplay: bool,

    /// Pause between a track ending and the next one resuming (default: 100ms)
    pub grace_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            grace_delay: Duration::from_millis(100),
        }
    }
}

impl From<&PlaybackSettings> for PlaybackConfig {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            autoplay: settings.autoplay,
            grace_delay: settings.grace_delay(),
        }
    }
}

/// A scheduled auto-advance resume
///
/// Whoever owns the timer waits `delay` and then hands `token` back to
/// [`PlaybackMachine::resume_after_grace`](crate::PlaybackMachine::resume_after_grace).
/// Tokens are never reused, so a resume for a discarded ticket is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeTicket {
    pub token: u64,
    pub delay: Duration,
}

/// Point-in-time copy of everything an observer can read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub current_index: usize,
    pub current_track: Option<Track>,
    pub track_count: usize,
    pub is_playing: bool,
    pub is_loading: bool,
    pub progress: Progress,
    pub last_error: Option<String>,
    pub resume_pending: bool,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            state: PlaybackState::Uninitialized,
            current_index: 0,
            current_track: None,
            track_count: 0,
            is_playing: false,
            is_loading: false,
            progress: Progress::default(),
            last_error: None,
            resume_pending: false,
        }
    }
}
