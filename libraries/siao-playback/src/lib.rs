//! SiaoPlay - Playback
//!
//! Platform-agnostic playback sequencing for SiaoPlay.
//!
//! This crate provides:
//! - A playback state machine over an ordered [`Track`](siao_core::Track) list
//! - Play/pause/stop/seek and next/previous/index navigation
//! - Auto-advance with a cancelable grace delay between tracks
//! - Media element lifecycle handling (loaded, progress, ended, error)
//! - A tokio driver that owns the machine and serializes access
//!
//! # Architecture
//!
//! The machine never touches real media. It instructs a [`MediaElement`]
//! and the platform reports back through [`MediaEvent`]s. Observers drain
//! [`PlaybackEvent`]s or read a [`PlayerSnapshot`].
//!
//! # Example
//!
//! ```rust
//! use siao_core::Track;
//! use siao_playback::{MediaEvent, NullMedia, PlaybackConfig, PlaybackMachine, PlaybackState};
//!
//! let mut machine = PlaybackMachine::new(PlaybackConfig::default(), Box::new(NullMedia));
//! machine.set_tracks(vec![
//!     Track::new("c1", "https://cdn.example.com/c1.mp3", "Chapter 1"),
//!     Track::new("c2", "https://cdn.example.com/c2.mp3", "Chapter 2"),
//! ]);
//! assert_eq!(machine.state(), PlaybackState::Loading);
//!
//! machine.handle_media_event(MediaEvent::Loaded { duration: 312.0 });
//! machine.play();
//! assert_eq!(machine.state(), PlaybackState::Playing);
//!
//! // Track ends: the machine moves on and waits out the grace delay
//! machine.handle_media_event(MediaEvent::Ended);
//! assert_eq!(machine.current_index(), 1);
//! let ticket = machine.pending_resume().unwrap();
//! machine.resume_after_grace(ticket.token);
//! assert!(machine.is_playing());
//! ```

pub mod driver;
mod error;
mod events;
mod machine;
mod media;
pub mod types;

// Public exports
pub use driver::{player_channel, MediaSink, PlayerCommand, PlayerHandle, PlayerInbox};
pub use error::{PlaybackError, Result};
pub use events::{MediaEvent, PlaybackEvent};
pub use machine::PlaybackMachine;
pub use media::{MediaElement, MediaSource, NullMedia};
pub use types::{PlaybackConfig, PlaybackState, PlayerSnapshot, Progress, ResumeTicket};
