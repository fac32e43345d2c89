//! Request filtering for the embedded player
//!
//! The YouTube player tries to navigate away from the embed (watch pages,
//! app links, channel pages). Those requests are blocked; the player's own
//! resources and Google asset hosts are allowed. Other providers are not
//! restricted.

use crate::embed::{Embed, Provider};
use tracing::debug;

const YOUTUBE_PLAYER_PATHS: [&str; 4] = [
    "youtube.com/embed/",
    "youtube.com/api/",
    "youtube.com/s/",
    "youtube.com/yts/",
];

const GOOGLE_ASSET_HOSTS: [&str; 6] = [
    "google.com",
    "gstatic.com",
    "doubleclick.net",
    "googlevideo.com",
    "ytimg.com",
    "googleapis.com",
];

/// Which navigation requests the embedded player may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Everything is allowed
    Unrestricted,
    /// Only YouTube player resources and Google asset hosts
    YouTubePlayer,
}

impl NavigationPolicy {
    pub fn for_embed(embed: &Embed) -> Self {
        match embed.provider() {
            Provider::YouTube => NavigationPolicy::YouTubePlayer,
            Provider::Vimeo | Provider::GenericCdn => NavigationPolicy::Unrestricted,
        }
    }

    /// Decide whether `request_url` may be loaded
    pub fn allows(&self, request_url: &str) -> bool {
        if is_inline(request_url) {
            return true;
        }

        match self {
            NavigationPolicy::Unrestricted => true,
            NavigationPolicy::YouTubePlayer => {
                let allowed = YOUTUBE_PLAYER_PATHS
                    .iter()
                    .chain(GOOGLE_ASSET_HOSTS.iter())
                    .any(|allowed| request_url.contains(allowed));

                if !allowed {
                    debug!(url = %request_url, "Blocked navigation from YouTube player");
                }
                allowed
            }
        }
    }
}

fn is_inline(url: &str) -> bool {
    url.is_empty() || url == "about:blank" || url.starts_with("data:") || url.starts_with("blob:")
}
