//! Async driver for [`PlaybackMachine`]
//!
//! One tokio task owns the machine. Commands arrive over an unbounded
//! channel, media element reports over a second one, and the grace delay of
//! an auto-advance is a single `sleep` armed inside the same `select!` loop.
//! Because the task is the only owner, a resume can never race a competing
//! command.
//!
//! ```rust,no_run
//! use siao_playback::{player_channel, NullMedia, PlaybackConfig, PlaybackMachine};
//!
//! # async fn demo() -> siao_playback::Result<()> {
//! let machine = PlaybackMachine::new(PlaybackConfig::default(), Box::new(NullMedia));
//! let (handle, inbox, _events) = player_channel();
//! let driver = tokio::spawn(inbox.run(machine));
//!
//! handle.play()?;
//! handle.shutdown()?;
//! driver.await.ok();
//! # Ok(())
//! # }
//! ```

use crate::{
    error::{PlaybackError, Result},
    events::{MediaEvent, PlaybackEvent},
    machine::PlaybackMachine,
    types::{PlayerSnapshot, ResumeTicket},
};
use siao_core::Track;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Commands accepted by the driver
#[derive(Debug)]
pub enum PlayerCommand {
    SetTracks(Vec<Track>),
    Play,
    Pause,
    Stop,
    SeekTo {
        position: f64,
        reply: oneshot::Sender<Result<()>>,
    },
    SkipToNext,
    SkipToPrevious,
    SkipToIndex(usize),
    Shutdown,
}

/// Create a connected handle/inbox pair plus the event stream
///
/// Spawn [`PlayerInbox::run`] with the machine to start the driver.
pub fn player_channel() -> (
    PlayerHandle,
    PlayerInbox,
    mpsc::UnboundedReceiver<PlaybackEvent>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (media_tx, media_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(PlayerSnapshot::default());

    let handle = PlayerHandle {
        commands: command_tx,
        media: MediaSink { events: media_tx },
        snapshots: snapshot_rx,
    };
    let inbox = PlayerInbox {
        commands: command_rx,
        media_events: media_rx,
        events: event_tx,
        snapshots: snapshot_tx,
    };

    (handle, inbox, event_rx)
}

/// Cloneable control surface for a running driver
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    media: MediaSink,
    snapshots: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    pub fn set_tracks(&self, tracks: Vec<Track>) -> Result<()> {
        self.send(PlayerCommand::SetTracks(tracks))
    }

    pub fn play(&self) -> Result<()> {
        self.send(PlayerCommand::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop)
    }

    /// Seek and wait for the machine's verdict
    pub async fn seek_to(&self, position: f64) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(PlayerCommand::SeekTo { position, reply })?;
        response.await.map_err(|_| PlaybackError::DriverClosed)?
    }

    pub fn skip_to_next(&self) -> Result<()> {
        self.send(PlayerCommand::SkipToNext)
    }

    pub fn skip_to_previous(&self) -> Result<()> {
        self.send(PlayerCommand::SkipToPrevious)
    }

    pub fn skip_to_index(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::SkipToIndex(index))
    }

    /// Report a media element event
    pub fn media_event(&self, event: MediaEvent) -> Result<()> {
        self.media.send(event)
    }

    /// Sender for media element implementations
    ///
    /// Sinks do not keep the driver alive; it stops once every
    /// [`PlayerHandle`] is gone.
    pub fn media_sink(&self) -> MediaSink {
        self.media.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch snapshots as they are published
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshots.clone()
    }

    /// Dispose the machine and stop the driver
    pub fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown)
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::DriverClosed)
    }
}

/// Channel back into the driver for media element reports
#[derive(Debug, Clone)]
pub struct MediaSink {
    events: mpsc::UnboundedSender<MediaEvent>,
}

impl MediaSink {
    pub fn send(&self, event: MediaEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| PlaybackError::DriverClosed)
    }
}

/// Receiving side of [`player_channel`]
#[derive(Debug)]
pub struct PlayerInbox {
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
    snapshots: watch::Sender<PlayerSnapshot>,
}

impl PlayerInbox {
    /// Drive `machine` until shutdown or until every handle is dropped
    ///
    /// The machine is disposed on exit, so nothing mutates it afterwards and
    /// an armed grace timer is dropped with the loop.
    pub async fn run(mut self, mut machine: PlaybackMachine) {
        let mut armed: Option<ResumeTicket> = None;
        let grace = sleep(Duration::ZERO);
        tokio::pin!(grace);

        self.publish(&mut machine);

        loop {
            let pending = machine.pending_resume();
            if pending != armed {
                if let Some(ticket) = pending {
                    grace.as_mut().reset(Instant::now() + ticket.delay);
                }
                armed = pending;
            }

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => apply(&mut machine, command),
                },
                Some(event) = self.media_events.recv() => {
                    machine.handle_media_event(event);
                }
                () = grace.as_mut(), if armed.is_some() => {
                    if let Some(ticket) = armed.take() {
                        machine.resume_after_grace(ticket.token);
                    }
                }
            }

            self.publish(&mut machine);
        }

        machine.dispose();
        self.publish(&mut machine);
        debug!("Player driver stopped");
    }

    fn publish(&self, machine: &mut PlaybackMachine) {
        for event in machine.drain_events() {
            // Nobody listening is fine
            let _ = self.events.send(event);
        }
        self.snapshots.send_replace(machine.snapshot());
    }
}

fn apply(machine: &mut PlaybackMachine, command: PlayerCommand) {
    match command {
        PlayerCommand::SetTracks(tracks) => machine.set_tracks(tracks),
        PlayerCommand::Play => machine.play(),
        PlayerCommand::Pause => machine.pause(),
        PlayerCommand::Stop => machine.stop(),
        PlayerCommand::SeekTo { position, reply } => {
            let _ = reply.send(machine.seek_to(position));
        }
        PlayerCommand::SkipToNext => machine.skip_to_next(),
        PlayerCommand::SkipToPrevious => machine.skip_to_previous(),
        PlayerCommand::SkipToIndex(index) => machine.skip_to_index(index),
        PlayerCommand::Shutdown => {}
    }
}
