//! Content lookups: audiobooks, albums, series, courses and movies.

use crate::error::{ApiClientError, Result};
use crate::response::read_json;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use siao_core::types::{
    Album, Audiobook, Chapter, Course, Episode, Movie, Season, Series, Song,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Catalog client for the content API.
///
/// Borrows the session token of its [`crate::ContentClient`]; a 401 clears
/// it so the next call goes out unauthenticated.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a RwLock<Option<String>>,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        token: &'a RwLock<Option<String>>,
    ) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    pub async fn audiobook(&self, id: &str) -> Result<Audiobook> {
        self.get_json(&format!("/audiobooks/{}", id), "audiobook")
            .await
    }

    pub async fn audiobook_chapters(&self, audiobook_id: &str) -> Result<Vec<Chapter>> {
        self.get_json(&format!("/audiobooks/{}/chapters", audiobook_id), "chapters")
            .await
    }

    pub async fn album(&self, id: &str) -> Result<Album> {
        self.get_json(&format!("/albums/{}", id), "album").await
    }

    pub async fn album_songs(&self, album_id: &str) -> Result<Vec<Song>> {
        self.get_json(&format!("/albums/{}/songs", album_id), "songs")
            .await
    }

    pub async fn series(&self, id: &str) -> Result<Series> {
        self.get_json(&format!("/series/{}", id), "series").await
    }

    pub async fn series_seasons(&self, series_id: &str) -> Result<Vec<Season>> {
        self.get_json(&format!("/series/{}/seasons", series_id), "seasons")
            .await
    }

    pub async fn season_episodes(&self, season_id: &str) -> Result<Vec<Episode>> {
        self.get_json(&format!("/seasons/{}/episodes", season_id), "episodes")
            .await
    }

    /// Course with its modules and classrooms inlined
    pub async fn course(&self, id: &str) -> Result<Course> {
        self.get_json(&format!("/courses/{}", id), "course").await
    }

    pub async fn movie(&self, id: &str) -> Result<Movie> {
        self.get_json(&format!("/movies/{}", id), "movie").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching {}", what);

        let mut request = self.http.get(&url);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiClientError::from_send)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Session rejected, clearing token");
            *self.token.write().await = None;
            return Err(ApiClientError::AuthRequired);
        }

        read_json(response, what).await
    }
}
