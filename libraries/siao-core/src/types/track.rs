/// Playable track type
use serde::{Deserialize, Serialize};

/// A playable unit in a track list (chapter, song, episode or lesson)
///
/// Built from raw API records by [`crate::TrackListBuilder`]; the playback
/// machine only ever sees tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier, unique within its list
    pub id: String,

    /// Media location (absolute once built)
    pub url: String,

    /// Display title
    pub title: String,

    /// Display artist, resolved through the record type's fallback chain
    pub artist: Option<String>,

    /// Artwork image URL
    pub artwork: Option<String>,

    /// Expected length in seconds, replaced by the media element's report
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track with only the required fields
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
            artist: None,
            artwork: None,
            duration: None,
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the artwork URL
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Set the expected duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}
