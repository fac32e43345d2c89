//! Provider dispatch
use crate::cdn;
use crate::embed::Embed;
use crate::error::{ResolveError, Result};
use crate::vimeo;
use crate::youtube;
use siao_core::config::EmbedSettings;
use siao_core::media_url::is_absolute;
use tracing::{debug, warn};

/// Resolves raw video URLs into [`Embed`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedResolver {
    cdn_markers: Vec<String>,
}

impl EmbedResolver {
    /// Create a resolver recognising the given CDN host markers
    pub fn new(cdn_markers: Vec<String>) -> Self {
        Self { cdn_markers }
    }

    /// Create a resolver from the `[embed]` configuration section
    pub fn from_settings(settings: &EmbedSettings) -> Self {
        Self::new(settings.cdn_markers.clone())
    }

    pub fn cdn_markers(&self) -> &[String] {
        &self.cdn_markers
    }

    /// Resolve a video URL.
    ///
    /// Providers are tried in a fixed order (YouTube, Vimeo, generic CDN)
    /// and the first match wins. A missing scheme is treated as `https://`.
    pub fn resolve(&self, input: &str) -> Result<Embed> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(unsupported(trimmed));
        }

        let url = if is_absolute(trimmed) {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let embed = if let Some(id) = youtube::extract_video_id(&url) {
            Embed::YouTube {
                video_id: id.to_string(),
            }
        } else if let Some(id) = vimeo::extract_video_id(&url) {
            Embed::Vimeo {
                video_id: id.to_string(),
                embed_url: vimeo::player_url(id),
            }
        } else if cdn::matches_host(&url, &self.cdn_markers) {
            Embed::GenericCdn {
                embed_url: cdn::with_autoplay(&url),
            }
        } else {
            return Err(unsupported(trimmed));
        };

        debug!(provider = %embed.provider(), url = %url, "Resolved embed URL");
        Ok(embed)
    }
}

impl Default for EmbedResolver {
    fn default() -> Self {
        Self::from_settings(&EmbedSettings::default())
    }
}

/// Resolve with the default CDN markers
pub fn resolve_embed(input: &str) -> Result<Embed> {
    EmbedResolver::default().resolve(input)
}

fn unsupported(url: &str) -> ResolveError {
    warn!(url = %url, "Unsupported video URL");
    ResolveError::Unsupported {
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_unsupported() {
        assert_eq!(
            resolve_embed("   "),
            Err(ResolveError::Unsupported { url: String::new() })
        );
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let resolver = EmbedResolver::new(vec!["videos.example.org".to_string()]);
        assert!(matches!(
            resolver.resolve("https://videos.example.org/embed/1"),
            Ok(Embed::GenericCdn { .. })
        ));
        assert!(resolver.resolve("https://x.pandavideo.com/embed").is_err());
    }

    #[test]
    fn default_uses_configured_markers() {
        assert_eq!(
            EmbedResolver::default().cdn_markers(),
            EmbedSettings::default().cdn_markers.as_slice()
        );
    }
}
