//! Playback machine - sequencing, progress and media lifecycle
//!
//! Owns the track list and the playing/loading/ended flags, instructs the
//! [`MediaElement`] and reacts to the [`MediaEvent`]s it reports back.
//! All access is `&mut self`; callers serialize it (see [`crate::driver`]).

use crate::{
    error::{PlaybackError, Result},
    events::{MediaEvent, PlaybackEvent},
    media::{MediaElement, MediaSource},
    types::{PlaybackConfig, PlaybackState, PlayerSnapshot, Progress, ResumeTicket},
};
use siao_core::Track;
use tracing::{debug, info, warn};

/// Playback state machine for one ordered track list
pub struct PlaybackMachine {
    config: PlaybackConfig,
    media: Box<dyn MediaElement>,

    tracks: Vec<Track>,
    index: usize,
    progress: Progress,

    playing: bool,
    loading: bool,
    ended: bool,

    // Set once PlaylistFinished has fired for the current arrival at the last track
    finished_notified: bool,

    last_error: Option<PlaybackError>,

    pending_resume: Option<ResumeTicket>,
    next_token: u64,

    disposed: bool,

    // Last state reported through StateChanged
    reported_state: PlaybackState,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackMachine {
    /// Create an empty machine driving `media`
    pub fn new(config: PlaybackConfig, media: Box<dyn MediaElement>) -> Self {
        Self {
            config,
            media,
            tracks: Vec::new(),
            index: 0,
            progress: Progress::default(),
            playing: false,
            loading: false,
            ended: false,
            finished_notified: false,
            last_error: None,
            pending_resume: None,
            next_token: 0,
            disposed: false,
            reported_state: PlaybackState::Uninitialized,
            pending_events: Vec::new(),
        }
    }

    // ===== Track List =====

    /// Replace the track list and start over at the first track
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        if self.disposed {
            return;
        }

        self.discard_resume();
        let previous_track_id = self.current_track().map(|t| t.id.clone());

        self.tracks = tracks;
        self.index = 0;
        self.progress = Progress::default();
        self.ended = false;
        self.finished_notified = false;
        self.last_error = None;

        debug!(count = self.tracks.len(), "Track list replaced");

        if self.tracks.is_empty() {
            self.loading = false;
            self.set_playing(false);
        } else {
            self.load_current(previous_track_id);
            if self.config.autoplay {
                self.set_playing(true);
            } else if self.playing {
                self.set_playing(false);
            }
        }

        self.sync_state();
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Clears the ended flag. After a media error the current source is
    /// loaded again before playing, so this is also the retry.
    pub fn play(&mut self) {
        if self.disposed || self.tracks.is_empty() {
            return;
        }

        self.discard_resume();
        self.ended = false;
        if self.last_error.take().is_some() {
            self.reload_current();
        }
        self.set_playing(true);
        self.sync_state();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.disposed {
            return;
        }

        self.discard_resume();
        self.set_playing(false);
        self.sync_state();
    }

    /// Pause and rewind the current track to the start
    pub fn stop(&mut self) {
        if self.disposed {
            return;
        }

        self.discard_resume();
        self.set_playing(false);
        self.media.seek(0.0);
        self.progress.position = 0.0;
        self.emit_position();
        self.sync_state();
    }

    /// Seek within the current track
    ///
    /// The upper bound is left to the media element; the stored position is
    /// updated optimistically and corrected by the next progress report.
    pub fn seek_to(&mut self, position: f64) -> Result<()> {
        if position.is_nan() || position.is_infinite() || position < 0.0 {
            return Err(PlaybackError::InvalidSeekPosition(position));
        }
        if self.disposed || self.tracks.is_empty() {
            return Ok(());
        }

        self.discard_resume();
        self.media.seek(position);
        self.progress.position = position;
        self.emit_position();
        self.sync_state();
        Ok(())
    }

    /// Skip to the next track (no-op on the last track)
    pub fn skip_to_next(&mut self) {
        if self.disposed || self.index + 1 >= self.tracks.len() {
            return;
        }

        self.discard_resume();
        self.change_index(self.index + 1);
        self.set_playing(true);
        self.sync_state();
    }

    /// Go to the previous track, or rewind when already on the first
    pub fn skip_to_previous(&mut self) {
        if self.disposed || self.tracks.is_empty() {
            return;
        }

        if self.index == 0 {
            // 0.0 is always a valid position
            let _ = self.seek_to(0.0);
            return;
        }

        self.discard_resume();
        self.change_index(self.index - 1);
        self.set_playing(true);
        self.sync_state();
    }

    /// Jump to `index` and play (no-op when out of range)
    ///
    /// Selecting the current track resumes it without reloading.
    pub fn skip_to_index(&mut self, index: usize) {
        if self.disposed || index >= self.tracks.len() {
            return;
        }

        if index == self.index {
            self.play();
            return;
        }

        self.discard_resume();
        self.change_index(index);
        self.set_playing(true);
        self.sync_state();
    }

    // ===== Media Events =====

    /// Feed a media element report into the machine
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Loaded { duration } => self.on_loaded(duration),
            MediaEvent::Progress {
                current_time,
                seekable_duration,
            } => self.on_progress(current_time, seekable_duration),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error { message } => self.on_error(message),
        }
    }

    /// The current source finished loading
    pub fn on_loaded(&mut self, duration: f64) {
        if self.disposed || self.tracks.is_empty() {
            return;
        }

        self.loading = false;

        if duration.is_finite() && duration > 0.0 {
            self.progress.duration = duration;
            if let Some(track) = self.tracks.get_mut(self.index) {
                track.duration = Some(duration);
            }
            self.emit_position();
        }

        if self.config.autoplay && self.index == 0 && !self.ended {
            self.set_playing(true);
        }

        debug!(index = self.index, duration, "Track loaded");
        self.sync_state();
    }

    /// Periodic position report
    ///
    /// `seekable_duration` only fills in a duration that is still unknown.
    pub fn on_progress(&mut self, current_time: f64, seekable_duration: f64) {
        if self.disposed || self.tracks.is_empty() {
            return;
        }

        if current_time.is_finite() {
            self.progress.position = current_time.max(0.0);
        }
        if self.progress.duration == 0.0 && seekable_duration.is_finite() && seekable_duration > 0.0
        {
            self.progress.duration = seekable_duration;
        }

        self.emit_position();
    }

    /// The current source played to the end
    ///
    /// Advances to the next track and schedules a resume after the grace
    /// delay, or marks the list as ended on the last track.
    pub fn on_ended(&mut self) {
        if self.disposed || self.tracks.is_empty() {
            return;
        }

        self.discard_resume();
        self.set_playing(false);

        if self.index + 1 < self.tracks.len() {
            self.change_index(self.index + 1);

            if self.config.grace_delay.is_zero() {
                self.set_playing(true);
            } else {
                let ticket = ResumeTicket {
                    token: self.next_token,
                    delay: self.config.grace_delay,
                };
                self.next_token += 1;
                self.pending_resume = Some(ticket);
                debug!(
                    token = ticket.token,
                    delay_ms = ticket.delay.as_millis() as u64,
                    "Scheduled resume"
                );
            }
        } else {
            self.ended = true;
            if !self.finished_notified {
                self.finished_notified = true;
                info!(count = self.tracks.len(), "Playlist finished");
                self.pending_events.push(PlaybackEvent::PlaylistFinished);
            }
        }

        self.sync_state();
    }

    /// The media element failed; the track stays selected, no retry
    pub fn on_error(&mut self, message: impl Into<String>) {
        if self.disposed {
            return;
        }

        let message = message.into();
        warn!(index = self.index, error = %message, "Media error");

        self.discard_resume();
        self.loading = false;
        self.set_playing(false);

        let error = PlaybackError::MediaLoad(message);
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
        self.last_error = Some(error);
        self.sync_state();
    }

    // ===== Grace Timer =====

    /// Complete a scheduled auto-advance
    ///
    /// Ignored unless `token` belongs to the pending ticket.
    pub fn resume_after_grace(&mut self, token: u64) {
        if self.disposed {
            return;
        }

        match self.pending_resume {
            Some(ticket) if ticket.token == token => {
                self.pending_resume = None;
                self.set_playing(true);
                self.sync_state();
            }
            _ => debug!(token, "Ignoring stale resume"),
        }
    }

    /// Pending auto-advance, if any
    pub fn pending_resume(&self) -> Option<ResumeTicket> {
        self.pending_resume
    }

    /// Tear down: drop the pending resume and silence the media element
    ///
    /// Every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.discard_resume();
        self.set_playing(false);
        self.disposed = true;
        debug!("Playback machine disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ===== State Queries =====

    /// Derived playback state
    pub fn state(&self) -> PlaybackState {
        if self.tracks.is_empty() {
            PlaybackState::Uninitialized
        } else if self.ended {
            PlaybackState::Ended
        } else if self.loading {
            PlaybackState::Loading
        } else if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Copy of the observable state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state(),
            current_index: self.index,
            current_track: self.current_track().cloned(),
            track_count: self.tracks.len(),
            is_playing: self.playing,
            is_loading: self.loading,
            progress: self.progress,
            last_error: self.last_error.as_ref().map(|e| e.to_string()),
            resume_pending: self.pending_resume.is_some(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn discard_resume(&mut self) {
        if let Some(ticket) = self.pending_resume.take() {
            debug!(token = ticket.token, "Discarded pending resume");
        }
    }

    /// Move to `index`: mark loading, clear per-track flags and load the source.
    /// Progress is kept until the media element reports again.
    fn change_index(&mut self, index: usize) {
        let previous_track_id = self.current_track().map(|t| t.id.clone());
        self.index = index;
        self.ended = false;
        self.finished_notified = false;
        self.last_error = None;
        self.load_current(previous_track_id);
    }

    fn load_current(&mut self, previous_track_id: Option<String>) {
        let Some(track) = self.tracks.get(self.index) else {
            return;
        };

        let source = MediaSource::from(track);
        let track_id = track.id.clone();
        self.loading = true;

        debug!(index = self.index, track_id = %track_id, url = %source.url, "Loading track");
        self.media.load(&source);

        self.pending_events.push(PlaybackEvent::TrackChanged {
            index: self.index,
            track_id,
            previous_track_id,
        });
    }

    /// Load the current source again without changing the index
    fn reload_current(&mut self) {
        let Some(track) = self.tracks.get(self.index) else {
            return;
        };

        let source = MediaSource::from(track);
        self.loading = true;

        debug!(index = self.index, url = %source.url, "Reloading track after error");
        self.media.load(&source);
    }

    /// Set the playing flag and instruct the media element
    ///
    /// The instruction is always issued (a freshly loaded source needs it);
    /// the event only fires when the flag actually flips.
    fn set_playing(&mut self, playing: bool) {
        if playing {
            self.media.play();
        } else {
            self.media.pause();
        }

        if self.playing != playing {
            self.playing = playing;
            self.pending_events.push(PlaybackEvent::PlayingChanged { playing });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position: self.progress.position,
            duration: self.progress.duration,
        });
    }

    fn sync_state(&mut self) {
        let state = self.state();
        if state != self.reported_state {
            debug!(from = ?self.reported_state, to = ?state, "State changed");
            self.reported_state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }
}
