//! Shared helpers for playback integration tests

#![allow(dead_code)]

use siao_core::Track;
use siao_playback::{MediaElement, MediaSource, PlaybackConfig, PlaybackMachine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One instruction received by the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
}

/// Media element that records every instruction
#[derive(Debug, Clone, Default)]
pub struct RecordingMedia {
    calls: Arc<Mutex<Vec<MediaCall>>>,
}

impl RecordingMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Return and forget the calls recorded so far
    pub fn take(&self) -> Vec<MediaCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn loads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::Load(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Last play/pause instruction, if any
    pub fn last_transport(&self) -> Option<MediaCall> {
        self.calls()
            .into_iter()
            .rev()
            .find(|call| matches!(call, MediaCall::Play | MediaCall::Pause))
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaElement for RecordingMedia {
    fn load(&mut self, source: &MediaSource) {
        self.record(MediaCall::Load(source.track_id.clone()));
    }

    fn play(&mut self) {
        self.record(MediaCall::Play);
    }

    fn pause(&mut self) {
        self.record(MediaCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.record(MediaCall::Seek(position));
    }
}

pub fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| {
            Track::new(
                format!("track{}", i),
                format!("https://cdn.example.com/media/{}.mp3", i),
                format!("Track {}", i),
            )
            .with_artist("Narrator")
            .with_duration(180.0)
        })
        .collect()
}

pub fn config(autoplay: bool, grace_ms: u64) -> PlaybackConfig {
    PlaybackConfig {
        autoplay,
        grace_delay: Duration::from_millis(grace_ms),
    }
}

/// Machine plus a handle on its media element's call log
pub fn machine_with(config: PlaybackConfig) -> (PlaybackMachine, RecordingMedia) {
    let media = RecordingMedia::new();
    let machine = PlaybackMachine::new(config, Box::new(media.clone()));
    (machine, media)
}

/// Machine with `n` tracks, first track loaded and paused
pub fn loaded_machine(n: usize) -> (PlaybackMachine, RecordingMedia) {
    let (mut machine, media) = machine_with(config(false, 100));
    machine.set_tracks(tracks(n));
    machine.on_loaded(180.0);
    machine.drain_events();
    media.take();
    (machine, media)
}
