//! Simulated media element
//!
//! Stands in for a real player: "loads" instantly, advances a position
//! counter on a timer while playing and reports back through the driver's
//! [`MediaSink`].

use siao_playback::{MediaElement, MediaEvent, MediaSink, MediaSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// How the simulation behaves
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Reported duration of every track, in seconds
    pub clip_secs: f64,

    /// Interval between progress reports (one tick advances the same amount)
    pub tick: Duration,

    /// Sources whose URL contains this fail to load
    pub fail_on: Option<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            clip_secs: 3.0,
            tick: Duration::from_millis(250),
            fail_on: None,
        }
    }
}

pub struct SimulatedMedia {
    sink: MediaSink,
    settings: SimulationSettings,
    /// f64 bits, shared with the ticker task
    position: Arc<AtomicU64>,
    loaded: bool,
    ticker: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    pub fn new(sink: MediaSink, settings: SimulationSettings) -> Self {
        Self {
            sink,
            settings,
            position: Arc::new(AtomicU64::new(0f64.to_bits())),
            loaded: false,
            ticker: None,
        }
    }

    fn position(&self) -> f64 {
        f64::from_bits(self.position.load(Ordering::Relaxed))
    }

    fn set_position(&self, position: f64) {
        self.position.store(position.to_bits(), Ordering::Relaxed);
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn report(&self, event: MediaEvent) {
        if self.sink.send(event).is_err() {
            debug!("Driver gone, dropping media report");
        }
    }
}

impl MediaElement for SimulatedMedia {
    fn load(&mut self, source: &MediaSource) {
        self.stop_ticker();
        self.set_position(0.0);

        let fails = self
            .settings
            .fail_on
            .as_deref()
            .is_some_and(|pattern| source.url.contains(pattern));

        debug!(track_id = %source.track_id, url = %source.url, fails, "Simulated load");

        self.loaded = !fails;
        if fails {
            self.report(MediaEvent::Error {
                message: format!("cannot decode {}", source.url),
            });
        } else {
            self.report(MediaEvent::Loaded {
                duration: self.settings.clip_secs,
            });
        }
    }

    fn play(&mut self) {
        self.stop_ticker();
        if !self.loaded {
            return;
        }

        let sink = self.sink.clone();
        let position = Arc::clone(&self.position);
        let tick = self.settings.tick;
        let duration = self.settings.clip_secs;

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let current = f64::from_bits(position.load(Ordering::Relaxed));
                let next = (current + tick.as_secs_f64()).min(duration);
                position.store(next.to_bits(), Ordering::Relaxed);

                let progress = MediaEvent::Progress {
                    current_time: next,
                    seekable_duration: duration,
                };
                if sink.send(progress).is_err() {
                    break;
                }
                if next >= duration {
                    let _ = sink.send(MediaEvent::Ended);
                    break;
                }
            }
        }));
    }

    fn pause(&mut self) {
        self.stop_ticker();
    }

    fn seek(&mut self, position: f64) {
        let clamped = position.clamp(0.0, self.settings.clip_secs);
        debug!(from = self.position(), to = clamped, "Simulated seek");
        self.set_position(clamped);
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siao_core::Track;
    use siao_playback::{player_channel, PlayerHandle, PlayerInbox};

    fn source(url: &str) -> MediaSource {
        MediaSource::from(&Track::new("t1", url, "One"))
    }

    /// A sink whose channel stays open while the returned pair is alive
    fn open_sink() -> (MediaSink, (PlayerHandle, PlayerInbox)) {
        let (handle, inbox, _events) = player_channel();
        (handle.media_sink(), (handle, inbox))
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_reports_duration() {
        let (sink, _keep) = open_sink();
        let mut media = SimulatedMedia::new(sink, SimulationSettings::default());
        media.load(&source("https://cdn.example.com/a.mp3"));
        assert!(media.loaded);
        assert_eq!(media.position(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_pattern_blocks_playback() {
        let (sink, _keep) = open_sink();
        let settings = SimulationSettings {
            fail_on: Some("broken".to_string()),
            ..Default::default()
        };
        let mut media = SimulatedMedia::new(sink, settings);

        media.load(&source("https://cdn.example.com/broken.mp3"));
        media.play();

        assert!(!media.loaded);
        assert!(media.ticker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_is_clamped() {
        let (sink, _keep) = open_sink();
        let mut media = SimulatedMedia::new(sink, SimulationSettings::default());
        media.load(&source("https://cdn.example.com/a.mp3"));

        media.seek(99.0);
        assert_eq!(media.position(), 3.0);
        media.seek(-1.0);
        assert_eq!(media.position(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_advances_until_end() {
        let (sink, _keep) = open_sink();
        let mut media = SimulatedMedia::new(sink, SimulationSettings::default());
        media.load(&source("https://cdn.example.com/a.mp3"));
        media.play();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(media.position() >= 1.0);

        media.pause();
        let paused_at = media.position();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(media.position(), paused_at);
    }
}
