//! SiaoPlay Embed
//!
//! Turns the video URLs returned by the content API into something an
//! embedded web player can load.
//!
//! Supported providers, tried in this order:
//! - **YouTube**: `youtube.com/watch?v=`, `youtu.be/` and `youtube.com/embed/`
//! - **Vimeo**: any `vimeo.com/` path ending in a numeric video id
//! - **Generic CDN**: self-hosted players recognised by host marker
//!   (`pandavideo.com` and `panda.video` by default)
//!
//! # Example
//!
//! ```rust
//! use siao_embed::{resolve_embed, Embed};
//!
//! let embed = resolve_embed("https://youtu.be/dQw4w9WgXcQ?t=10").unwrap();
//! assert_eq!(embed, Embed::YouTube { video_id: "dQw4w9WgXcQ".to_string() });
//!
//! assert!(resolve_embed("https://example.com/video").is_err());
//! ```

#![forbid(unsafe_code)]

mod cdn;
mod embed;
mod error;
mod policy;
mod resolver;
mod vimeo;
mod youtube;

pub use embed::{Embed, Provider};
pub use error::{ResolveError, Result};
pub use policy::NavigationPolicy;
pub use resolver::{resolve_embed, EmbedResolver};
pub use youtube::youtube_embed_url;
