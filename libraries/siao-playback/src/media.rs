//! Platform-agnostic media element trait
//!
//! The machine only issues instructions; results come back asynchronously
//! as [`MediaEvent`](crate::MediaEvent)s.

use serde::{Deserialize, Serialize};
use siao_core::Track;

/// What the media element is asked to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub track_id: String,
    pub url: String,
    pub title: String,
    pub artist: Option<String>,
    pub artwork: Option<String>,
}

impl From<&Track> for MediaSource {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            url: track.url.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            artwork: track.artwork.clone(),
        }
    }
}

/// Platform media element
///
/// Implementors wrap whatever actually decodes and renders media (a web
/// view, a native player, a simulation). Stopping is `pause()` followed by
/// `seek(0.0)`.
pub trait MediaElement: Send {
    /// Replace the current source
    fn load(&mut self, source: &MediaSource);

    fn play(&mut self);

    fn pause(&mut self);

    /// Seek to `position` seconds from the start
    fn seek(&mut self, position: f64);
}

/// Media element that ignores every instruction
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMedia;

impl MediaElement for NullMedia {
    fn load(&mut self, _source: &MediaSource) {}

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn seek(&mut self, _position: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_track() {
        let track = Track::new("t1", "https://cdn.example.com/t1.mp3", "One")
            .with_artist("Artist");
        let source = MediaSource::from(&track);
        assert_eq!(source.track_id, "t1");
        assert_eq!(source.url, "https://cdn.example.com/t1.mp3");
        assert_eq!(source.artist.as_deref(), Some("Artist"));
        assert!(source.artwork.is_none());
    }
}
