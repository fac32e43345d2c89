//! Subcommand implementations

use crate::simulated::{SimulatedMedia, SimulationSettings};
use crate::{Credentials, Source};
use anyhow::{bail, Context};
use serde_json::json;
use siao_api_client::{ContentApi, ContentClient};
use siao_core::{AppConfig, Track};
use siao_embed::{EmbedResolver, NavigationPolicy};
use siao_playback::{
    player_channel, PlaybackConfig, PlaybackEvent, PlaybackMachine, PlayerSnapshot,
};
use std::path::Path;
use tracing::{info, warn};

/// Print the embed for `url` as JSON
pub fn resolve(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let resolver = EmbedResolver::from_settings(&config.embed);
    let embed = resolver.resolve(url)?;
    let policy = NavigationPolicy::for_embed(&embed);

    let output = json!({
        "embed": embed,
        "embed_url": embed.embed_url(),
        "restricted_navigation": policy != NavigationPolicy::Unrestricted,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Fetch and build the track list for `source`
pub async fn load_tracks(
    config: &AppConfig,
    credentials: &Credentials,
    source: &Source,
) -> anyhow::Result<Vec<Track>> {
    let media_base = config.media.server_base_url.as_str();

    let tracks = match source {
        Source::File { path } => read_track_file(path)?,
        Source::Audiobook { id } => {
            connect(config, credentials)
                .await?
                .audiobook_tracks(media_base, id)
                .await?
        }
        Source::Album { id } => {
            connect(config, credentials)
                .await?
                .album_tracks(media_base, id)
                .await?
        }
        Source::Season {
            series_id,
            season_id,
        } => {
            connect(config, credentials)
                .await?
                .season_tracks(media_base, series_id, season_id)
                .await?
        }
        Source::Course { id } => {
            connect(config, credentials)
                .await?
                .course_tracks(media_base, id)
                .await?
        }
    };

    info!(tracks = tracks.len(), "Track list ready");
    Ok(tracks)
}

fn read_track_file(path: &Path) -> anyhow::Result<Vec<Track>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON track list", path.display()))
}

/// Client for the configured API, signed in when credentials are given
async fn connect(config: &AppConfig, credentials: &Credentials) -> anyhow::Result<ContentClient> {
    let client = ContentClient::new(&config.api)?;
    authenticate(&client, credentials).await?;
    Ok(client)
}

async fn authenticate(client: &ContentClient, credentials: &Credentials) -> anyhow::Result<()> {
    match (&credentials.token, &credentials.email, &credentials.password) {
        (Some(token), _, _) => client.set_token(token.clone()).await,
        (None, Some(email), Some(password)) => {
            client.login(email, password).await?;
        }
        (None, Some(_), None) => bail!("--email needs --password"),
        // Public content needs no session
        _ => {}
    }
    Ok(())
}

/// How a `play` run ended
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// The last track reached its end
    pub finished: bool,

    /// Ids of tracks that failed to load, in playback order
    pub failed: Vec<String>,

    /// State published after the driver shut down
    pub snapshot: PlayerSnapshot,
}

/// Run `tracks` through the driver until the list finishes or Ctrl-C
pub async fn play(
    config: &AppConfig,
    tracks: Vec<Track>,
    simulation: SimulationSettings,
) -> anyhow::Result<PlayOutcome> {
    if tracks.is_empty() {
        bail!("Nothing to play: the track list is empty");
    }
    let track_count = tracks.len();

    let (handle, inbox, mut events) = player_channel();
    let media = SimulatedMedia::new(handle.media_sink(), simulation);
    let machine = PlaybackMachine::new(PlaybackConfig::from(&config.playback), Box::new(media));
    let driver = tokio::spawn(inbox.run(machine));

    handle.set_tracks(tracks)?;
    handle.play()?;

    let mut current = 0;
    let mut current_id = None;
    let mut finished = false;
    let mut failed = Vec::new();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(PlaybackEvent::PlaylistFinished) => {
                    println!("Playlist finished");
                    finished = true;
                    break;
                }
                Some(PlaybackEvent::Error { message }) => {
                    println!("Error: {}", message);
                    failed.extend(current_id.clone());
                    if current + 1 >= track_count {
                        break;
                    }
                    warn!(index = current, "Skipping track that failed to load");
                    handle.skip_to_next()?;
                    handle.play()?;
                }
                Some(event) => {
                    if let PlaybackEvent::TrackChanged { index, track_id, .. } = &event {
                        current = *index;
                        current_id = Some(track_id.clone());
                    }
                    print_event(&event);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    handle.shutdown()?;
    driver.await?;

    let snapshot = handle.snapshot();
    if !finished {
        info!(state = ?snapshot.state, index = snapshot.current_index, "Stopped early");
    }
    Ok(PlayOutcome {
        finished,
        failed,
        snapshot,
    })
}

fn print_event(event: &PlaybackEvent) {
    match event {
        PlaybackEvent::TrackChanged {
            index, track_id, ..
        } => println!("Track {} ({})", index + 1, track_id),
        PlaybackEvent::StateChanged { state } => println!("  state: {:?}", state),
        PlaybackEvent::PositionUpdate { position, duration } => {
            println!("  {:>6.1}s / {:.1}s", position, duration);
        }
        PlaybackEvent::PlayingChanged { .. }
        | PlaybackEvent::PlaylistFinished
        | PlaybackEvent::Error { .. } => {}
    }
}
