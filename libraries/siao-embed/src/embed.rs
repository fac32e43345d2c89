use crate::youtube::youtube_embed_url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved, embeddable video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum Embed {
    /// YouTube video; the player URL is built from the id
    #[serde(rename = "youtube")]
    YouTube { video_id: String },

    /// Vimeo video with its player URL
    #[serde(rename = "vimeo")]
    Vimeo { video_id: String, embed_url: String },

    /// Self-hosted player; the original URL with autoplay enabled
    #[serde(rename = "generic_cdn")]
    GenericCdn { embed_url: String },
}

/// Video provider family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[serde(rename = "youtube")]
    YouTube,
    Vimeo,
    GenericCdn,
}

impl Embed {
    pub fn provider(&self) -> Provider {
        match self {
            Embed::YouTube { .. } => Provider::YouTube,
            Embed::Vimeo { .. } => Provider::Vimeo,
            Embed::GenericCdn { .. } => Provider::GenericCdn,
        }
    }

    /// URL to load in the embedded player
    pub fn embed_url(&self) -> String {
        match self {
            Embed::YouTube { video_id } => youtube_embed_url(video_id),
            Embed::Vimeo { embed_url, .. } | Embed::GenericCdn { embed_url } => embed_url.clone(),
        }
    }

    /// Provider video id, when the provider has one
    pub fn video_id(&self) -> Option<&str> {
        match self {
            Embed::YouTube { video_id } | Embed::Vimeo { video_id, .. } => Some(video_id),
            Embed::GenericCdn { .. } => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::YouTube => "youtube",
            Provider::Vimeo => "vimeo",
            Provider::GenericCdn => "generic_cdn",
        };
        f.write_str(name)
    }
}
