//! Main content API client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ApiClientError, Result};
use crate::types::LoginResponse;
use reqwest::Client;
use siao_core::config::ApiSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Client for the SiaoPlay content API.
///
/// Holds the HTTP connection pool and the in-memory session token. Cloning
/// is cheap and clones share the token.
///
/// # Example
///
/// ```ignore
/// use siao_api_client::ContentClient;
/// use siao_core::AppConfig;
///
/// let config = AppConfig::load()?;
/// let client = ContentClient::new(&config.api)?;
/// client.login("reader@example.com", "secret").await?;
///
/// let chapters = client.catalog().audiobook_chapters("42").await?;
/// println!("{} chapters", chapters.len());
/// ```
#[derive(Clone)]
pub struct ContentClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ContentClient {
    /// Create a client from the `[api]` settings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        Self::with_timeout(&settings.base_url, settings.timeout())
    }

    /// Create a client for `base_url` with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("SiaoPlay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Login with email and password.
    ///
    /// On success the token is kept for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self.auth().login(email, password).await?;
        *self.token.write().await = Some(response.token.clone());
        Ok(response)
    }

    /// Use a token obtained elsewhere.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Forget the session token.
    pub async fn logout(&self) {
        *self.token.write().await = None;
        info!("Logged out");
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.base_url, &self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_url_validation() {
        assert!(ContentClient::with_timeout("https://api.example.com", TIMEOUT).is_ok());
        assert!(ContentClient::with_timeout("http://localhost:8080/api/v1", TIMEOUT).is_ok());

        assert!(ContentClient::with_timeout("", TIMEOUT).is_err());
        assert!(ContentClient::with_timeout("not-a-url", TIMEOUT).is_err());
        assert!(ContentClient::with_timeout("ftp://example.com", TIMEOUT).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = ContentClient::with_timeout("https://api.example.com/v1/", TIMEOUT)
            .expect("valid url");
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_from_settings() {
        let settings = ApiSettings::default();
        let client = ContentClient::new(&settings).expect("default settings are valid");
        assert_eq!(client.base_url(), settings.base_url.trim_end_matches('/'));
    }
}
