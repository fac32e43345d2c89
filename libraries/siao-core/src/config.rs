/// Application configuration
///
/// Built once at start-up from an optional TOML file and `SIAO__`-prefixed
/// environment variables, then passed by reference to every consumer.
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "siao.toml";

/// Environment variable prefix (`SIAO__API__BASE_URL`, ...)
pub const ENV_PREFIX: &str = "SIAO";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub media: MediaSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub embed: EmbedSettings,

    #[serde(default)]
    pub storage: StorageKeys,
}

/// Remote content API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Media server used to resolve relative media and image paths
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaSettings {
    #[serde(default = "default_server_base_url")]
    pub server_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Start the first track as soon as it is loaded
    #[serde(default)]
    pub autoplay: bool,

    /// Pause between a track ending and the next one resuming
    #[serde(default = "default_grace_delay_ms")]
    pub grace_delay_ms: u64,
}

/// Self-hosted video domains recognised by the embed resolver
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedSettings {
    #[serde(default = "default_cdn_markers")]
    pub cdn_markers: Vec<String>,
}

/// Keys under which the session is stored by the host platform
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageKeys {
    #[serde(default = "default_user_token_key")]
    pub user_token: String,

    #[serde(default = "default_user_data_key")]
    pub user_data: String,

    #[serde(default = "default_theme_key")]
    pub theme: String,
}

impl AppConfig {
    /// Load configuration from `siao.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)))
    }

    /// Load configuration from an explicit file (if present) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::build(path, Self::environment())
    }

    /// Load configuration from a file and an explicit set of environment
    /// variables instead of the process environment
    pub fn load_with_vars(path: Option<&Path>, vars: config::Map<String, String>) -> Result<Self> {
        Self::build(path, Self::environment().source(Some(vars)))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("embed.cdn_markers")
            .try_parsing(true)
    }

    fn build(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading configuration file");
                settings = settings.add_source(config::File::from(path));
            }
        }

        let config: AppConfig = settings.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_http_url("api.base_url", &self.api.base_url)?;
        check_http_url("media.server_base_url", &self.media.server_base_url)?;

        if self.api.timeout_secs == 0 {
            return Err(CoreError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self.media.server_base_url = self.media.server_base_url.trim_end_matches('/').to_string();
        self.embed.cdn_markers.retain(|m| !m.trim().is_empty());
        self
    }
}

impl ApiSettings {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PlaybackSettings {
    /// Grace delay as a `Duration`
    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }
}

fn check_http_url(field: &str, value: &str) -> Result<()> {
    let invalid = || CoreError::InvalidUrl {
        field: field.to_string(),
        value: value.to_string(),
    };

    let parsed = url::Url::parse(value).map_err(|_| invalid())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid());
    }
    Ok(())
}

// Default values
impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            server_base_url: default_server_base_url(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: false,
            grace_delay_ms: default_grace_delay_ms(),
        }
    }
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            cdn_markers: default_cdn_markers(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            user_token: default_user_token_key(),
            user_data: default_user_data_key(),
            theme: default_theme_key(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_server_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_grace_delay_ms() -> u64 {
    100
}

fn default_cdn_markers() -> Vec<String> {
    vec!["pandavideo.com".to_string(), "panda.video".to_string()]
}

fn default_user_token_key() -> String {
    "@siaoplay:user_token".to_string()
}

fn default_user_data_key() -> String {
    "@siaoplay:user_data".to_string()
}

fn default_theme_key() -> String {
    "@siaoplay:theme".to_string()
}
