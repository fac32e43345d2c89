//! SiaoPlay Core
//!
//! Platform-agnostic types shared by every SiaoPlay crate.
//!
//! This crate provides:
//! - **Domain Types**: playable [`Track`]s and the raw content records returned
//!   by the content API (chapters, songs, episodes, classrooms)
//! - **Track List Building**: one generic filter/sort/map transformation
//!   ([`TrackListBuilder`]) used for every content type
//! - **Media URLs**: the base-URL join rule for relative media and image paths
//! - **Configuration**: [`AppConfig`], built once at start-up and passed around
//! - **Error Handling**: [`CoreError`] and [`Result`]
//!
//! # Example
//!
//! ```rust
//! use siao_core::types::{Audiobook, Chapter};
//! use siao_core::track_list::audiobook_tracks;
//!
//! let audiobook = Audiobook {
//!     id: "ab1".to_string(),
//!     title: "Dom Casmurro".to_string(),
//!     narrator: Some("Narrator".to_string()),
//!     ..Default::default()
//! };
//! let chapters = vec![Chapter {
//!     id: "c1".to_string(),
//!     title: "Chapter 1".to_string(),
//!     audio_file: "/media/c1.mp3".to_string(),
//!     is_published: true,
//!     order: 1,
//!     ..Default::default()
//! }];
//!
//! let tracks = audiobook_tracks("https://cdn.example.com", &audiobook, chapters);
//! assert_eq!(tracks[0].url, "https://cdn.example.com/media/c1.mp3");
//! assert_eq!(tracks[0].artist.as_deref(), Some("Narrator"));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod media_url;
pub mod track_list;
pub mod types;

pub use config::AppConfig;
pub use error::{CoreError, Result};
pub use track_list::{SourceRecord, TrackListBuilder};
pub use types::Track;
