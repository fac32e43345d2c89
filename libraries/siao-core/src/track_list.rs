//! Track list building
//!
//! Turns raw content records into an ordered list of playable [`Track`]s.
//! Every content type goes through the same three steps, in this order:
//!
//! 1. keep only records that are published and carry a source URL
//! 2. stable sort ascending by the record type's ordinal field
//! 3. map fields, resolving artist and artwork through fallback chains
//!
//! Filtering before sorting matters: unpublished records never occupy an
//! ordinal slot in the output.

use crate::media_url::{join_base_url, resolve_optional};
use crate::types::{Album, Audiobook, Chapter, Classroom, Course, Episode, Series, Song, Track};
use tracing::debug;

/// Artist label used when every candidate in the chain is empty
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// A raw API record that can become a [`Track`]
pub trait SourceRecord {
    /// Stable identifier
    fn id(&self) -> &str;

    /// Display title
    fn title(&self) -> &str;

    /// Media location as returned by the API (may be relative or blank)
    fn source_url(&self) -> Option<&str>;

    /// Whether the record is visible to listeners
    fn is_published(&self) -> bool;

    /// Expected duration in seconds, if the API reports one
    fn duration(&self) -> Option<f64>;

    /// Published and has a non-blank source URL
    fn is_playable(&self) -> bool {
        self.is_published() && self.source_url().is_some_and(|u| !u.trim().is_empty())
    }
}

type Candidate<'a, R> = Box<dyn Fn(&R) -> Option<String> + 'a>;

/// Generic filter/sort/map transformation from records to tracks
///
/// # Example
///
/// ```rust
/// use siao_core::types::Chapter;
/// use siao_core::TrackListBuilder;
///
/// let chapters = vec![
///     Chapter { id: "b".into(), audio_file: "b.mp3".into(), is_published: true, order: 2, ..Default::default() },
///     Chapter { id: "a".into(), audio_file: "a.mp3".into(), is_published: true, order: 1, ..Default::default() },
/// ];
///
/// let tracks = TrackListBuilder::new("https://cdn.example.com", |c: &Chapter| c.order)
///     .artist(|_| Some("Narrator".to_string()))
///     .build(chapters);
///
/// let ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
/// assert_eq!(ids, ["a", "b"]);
/// ```
pub struct TrackListBuilder<'a, R> {
    base_url: &'a str,
    ordinal: Box<dyn Fn(&R) -> i64 + 'a>,
    artist_chain: Vec<Candidate<'a, R>>,
    artwork_chain: Vec<Candidate<'a, R>>,
    unknown_artist: &'a str,
}

impl<'a, R: SourceRecord> TrackListBuilder<'a, R> {
    /// Create a builder ordering records by `ordinal`
    pub fn new(base_url: &'a str, ordinal: impl Fn(&R) -> i64 + 'a) -> Self {
        Self {
            base_url,
            ordinal: Box::new(ordinal),
            artist_chain: Vec::new(),
            artwork_chain: Vec::new(),
            unknown_artist: UNKNOWN_ARTIST,
        }
    }

    /// Append an artist candidate; earlier candidates win
    #[must_use]
    pub fn artist(mut self, candidate: impl Fn(&R) -> Option<String> + 'a) -> Self {
        self.artist_chain.push(Box::new(candidate));
        self
    }

    /// Append an artwork candidate; earlier candidates win
    #[must_use]
    pub fn artwork(mut self, candidate: impl Fn(&R) -> Option<String> + 'a) -> Self {
        self.artwork_chain.push(Box::new(candidate));
        self
    }

    /// Override the label used when no artist candidate matches
    #[must_use]
    pub fn unknown_artist(mut self, label: &'a str) -> Self {
        self.unknown_artist = label;
        self
    }

    /// Run the transformation
    pub fn build(&self, records: impl IntoIterator<Item = R>) -> Vec<Track> {
        let mut total = 0usize;
        let mut playable: Vec<R> = records
            .into_iter()
            .inspect(|_| total += 1)
            .filter(|record| record.is_playable())
            .collect();

        playable.sort_by_key(|record| (self.ordinal)(record));

        debug!(
            total,
            kept = playable.len(),
            dropped = total - playable.len(),
            "Built track list"
        );

        playable.iter().map(|record| self.map_record(record)).collect()
    }

    fn map_record(&self, record: &R) -> Track {
        let url = record.source_url().map(str::trim).unwrap_or_default();
        let artist = first_non_blank(&self.artist_chain, record)
            .unwrap_or_else(|| self.unknown_artist.to_string());
        let artwork = first_non_blank(&self.artwork_chain, record)
            .and_then(|path| resolve_optional(self.base_url, Some(&path)));

        Track {
            id: record.id().to_string(),
            url: join_base_url(self.base_url, url),
            title: record.title().to_string(),
            artist: Some(artist),
            artwork,
            duration: record.duration().filter(|d| d.is_finite() && *d > 0.0),
        }
    }
}

fn first_non_blank<R>(chain: &[Candidate<'_, R>], record: &R) -> Option<String> {
    chain
        .iter()
        .filter_map(|candidate| candidate(record))
        .find(|value| !value.trim().is_empty())
}

impl SourceRecord for Chapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source_url(&self) -> Option<&str> {
        Some(&self.audio_file)
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

impl SourceRecord for Song {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source_url(&self) -> Option<&str> {
        Some(&self.audio_url)
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration_seconds)
    }
}

impl SourceRecord for Episode {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

impl SourceRecord for Classroom {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source_url(&self) -> Option<&str> {
        Some(&self.video)
    }

    fn is_published(&self) -> bool {
        self.status
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

/// Chapters of an audiobook (artist: first author, then narrator)
pub fn audiobook_tracks(
    base_url: &str,
    audiobook: &Audiobook,
    chapters: Vec<Chapter>,
) -> Vec<Track> {
    TrackListBuilder::new(base_url, |c: &Chapter| c.order)
        .artist(|_| audiobook.authors.first().map(|a| a.name.clone()))
        .artist(|_| audiobook.narrator.clone())
        .artwork(|_| audiobook.poster.clone())
        .artwork(|_| audiobook.banner.clone())
        .build(chapters)
}

/// Songs of an album (artist: song's first artist, then album artist)
pub fn album_tracks(base_url: &str, album: &Album, songs: Vec<Song>) -> Vec<Track> {
    TrackListBuilder::new(base_url, |s: &Song| s.track_number)
        .artist(|s: &Song| s.artists.first().map(|a| a.name.clone()))
        .artist(|_| album.artist.as_ref().map(|a| a.name.clone()))
        .artwork(|_| album.poster.clone())
        .artwork(|_| album.banner.clone())
        .build(songs)
}

/// Episodes of one season
pub fn episode_tracks(base_url: &str, series: &Series, episodes: Vec<Episode>) -> Vec<Track> {
    TrackListBuilder::new(base_url, |e: &Episode| e.episode_number)
        .artist(|_| Some(series.title.clone()))
        .artwork(|e: &Episode| e.thumbnail.clone())
        .artwork(|_| series.poster.clone())
        .artwork(|_| series.banner.clone())
        .build(episodes)
}

/// Lessons of a course, module by module
///
/// Modules with an id are ordered by their `order` field before their
/// classrooms are built. A module's own `status` is not consulted; only each
/// classroom's.
pub fn course_tracks(base_url: &str, course: &Course) -> Vec<Track> {
    let mut modules: Vec<_> = course
        .modules
        .iter()
        .filter(|m| !m.id.is_empty())
        .collect();
    modules.sort_by_key(|m| m.order);

    let builder = TrackListBuilder::new(base_url, |c: &Classroom| c.order)
        .artist(|_| Some(course.title.clone()))
        .artwork(|_| course.poster.clone())
        .artwork(|_| course.banner.clone());

    modules
        .into_iter()
        .flat_map(|module| builder.build(module.classrooms.iter().cloned()))
        .collect()
}
