//! Transport-independent view of the content API.

use crate::client::ContentClient;
use crate::error::Result;
use async_trait::async_trait;
use siao_core::track_list;
use siao_core::types::{
    Album, Audiobook, Chapter, Course, Episode, Movie, Season, Series, Song,
};
use siao_core::Track;
use tracing::debug;

/// Content lookups plus ready-to-play track lists.
///
/// [`ContentClient`] implements this over HTTP; tests and offline front ends
/// can supply their own records.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn audiobook(&self, id: &str) -> Result<Audiobook>;
    async fn audiobook_chapters(&self, audiobook_id: &str) -> Result<Vec<Chapter>>;
    async fn album(&self, id: &str) -> Result<Album>;
    async fn album_songs(&self, album_id: &str) -> Result<Vec<Song>>;
    async fn series(&self, id: &str) -> Result<Series>;
    async fn series_seasons(&self, series_id: &str) -> Result<Vec<Season>>;
    async fn season_episodes(&self, season_id: &str) -> Result<Vec<Episode>>;
    async fn course(&self, id: &str) -> Result<Course>;
    async fn movie(&self, id: &str) -> Result<Movie>;

    /// Playable chapters of an audiobook
    async fn audiobook_tracks(&self, media_base: &str, id: &str) -> Result<Vec<Track>> {
        let audiobook = self.audiobook(id).await?;
        let chapters = self.audiobook_chapters(id).await?;
        let tracks = track_list::audiobook_tracks(media_base, &audiobook, chapters);
        debug!(audiobook = %id, tracks = tracks.len(), "Built audiobook track list");
        Ok(tracks)
    }

    /// Playable songs of an album
    async fn album_tracks(&self, media_base: &str, id: &str) -> Result<Vec<Track>> {
        let album = self.album(id).await?;
        let songs = self.album_songs(id).await?;
        let tracks = track_list::album_tracks(media_base, &album, songs);
        debug!(album = %id, tracks = tracks.len(), "Built album track list");
        Ok(tracks)
    }

    /// Playable episodes of one season of a series
    async fn season_tracks(
        &self,
        media_base: &str,
        series_id: &str,
        season_id: &str,
    ) -> Result<Vec<Track>> {
        let series = self.series(series_id).await?;
        let episodes = self.season_episodes(season_id).await?;
        let tracks = track_list::episode_tracks(media_base, &series, episodes);
        debug!(season = %season_id, tracks = tracks.len(), "Built season track list");
        Ok(tracks)
    }

    /// Playable lessons of a course
    async fn course_tracks(&self, media_base: &str, id: &str) -> Result<Vec<Track>> {
        let course = self.course(id).await?;
        let tracks = track_list::course_tracks(media_base, &course);
        debug!(course = %id, tracks = tracks.len(), "Built course track list");
        Ok(tracks)
    }
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn audiobook(&self, id: &str) -> Result<Audiobook> {
        self.catalog().audiobook(id).await
    }

    async fn audiobook_chapters(&self, audiobook_id: &str) -> Result<Vec<Chapter>> {
        self.catalog().audiobook_chapters(audiobook_id).await
    }

    async fn album(&self, id: &str) -> Result<Album> {
        self.catalog().album(id).await
    }

    async fn album_songs(&self, album_id: &str) -> Result<Vec<Song>> {
        self.catalog().album_songs(album_id).await
    }

    async fn series(&self, id: &str) -> Result<Series> {
        self.catalog().series(id).await
    }

    async fn series_seasons(&self, series_id: &str) -> Result<Vec<Season>> {
        self.catalog().series_seasons(series_id).await
    }

    async fn season_episodes(&self, season_id: &str) -> Result<Vec<Episode>> {
        self.catalog().season_episodes(season_id).await
    }

    async fn course(&self, id: &str) -> Result<Course> {
        self.catalog().course(id).await
    }

    async fn movie(&self, id: &str) -> Result<Movie> {
        self.catalog().movie(id).await
    }
}
