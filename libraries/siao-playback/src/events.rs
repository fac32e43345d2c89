//! Playback Events
//!
//! Two directions:
//! - [`PlaybackEvent`]: emitted by the machine for observers (UI, driver)
//! - [`MediaEvent`]: lifecycle reports coming back from the media element

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Derived playback state changed
    StateChanged { state: PlaybackState },

    /// The playing flag flipped
    PlayingChanged { playing: bool },

    /// Current track changed
    TrackChanged {
        index: usize,
        track_id: String,
        previous_track_id: Option<String>,
    },

    /// Position or duration moved
    PositionUpdate { position: f64, duration: f64 },

    /// The last track of the list finished playing
    PlaylistFinished,

    /// The media element reported an error
    Error { message: String },
}

/// Lifecycle reports from the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Source loaded; `duration` in seconds (may be 0 or NaN when unknown)
    Loaded { duration: f64 },

    /// Periodic playback position
    Progress {
        current_time: f64,
        seekable_duration: f64,
    },

    /// Playback reached the end of the source
    Ended,

    /// The source could not be loaded or played
    Error { message: String },
}
