//! siao - headless SiaoPlay front end

use clap::{Args, Parser, Subcommand};
use siao_core::AppConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod simulated;

use simulated::SimulationSettings;

#[derive(Parser)]
#[command(name = "siao")]
#[command(about = "SiaoPlay playback core from the command line", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to siao.toml when present)
    #[arg(short, long, global = true, env = "SIAO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a video URL into an embeddable player URL
    Resolve {
        /// URL as returned by the content API
        url: String,
    },
    /// Fetch content and print its playable track list as JSON
    Tracks {
        #[command(flatten)]
        credentials: Credentials,

        #[command(subcommand)]
        source: Source,
    },
    /// Play a track list through a simulated media element
    Play {
        #[command(flatten)]
        credentials: Credentials,

        #[command(flatten)]
        simulation: SimulationArgs,

        #[command(subcommand)]
        source: Source,
    },
}

/// Where a track list comes from
#[derive(Subcommand, Clone)]
pub enum Source {
    /// Chapters of an audiobook
    Audiobook { id: String },
    /// Songs of an album
    Album { id: String },
    /// Episodes of one season of a series
    Season { series_id: String, season_id: String },
    /// Lessons of a course
    Course { id: String },
    /// A JSON array of tracks on disk
    File { path: PathBuf },
}

#[derive(Args, Clone)]
pub struct Credentials {
    /// Bearer token from an earlier login
    #[arg(long, env = "SIAO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Login email (used with --password when no token is given)
    #[arg(long, env = "SIAO_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "SIAO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Clone)]
struct SimulationArgs {
    /// Length of every simulated track, in seconds
    #[arg(long, default_value_t = 3.0)]
    clip_secs: f64,

    /// Progress report interval, in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Fail to load tracks whose URL contains this text
    #[arg(long)]
    fail_on: Option<String>,
}

impl From<SimulationArgs> for SimulationSettings {
    fn from(args: SimulationArgs) -> Self {
        Self {
            clip_secs: args.clip_secs,
            tick: Duration::from_millis(args.tick_ms.max(1)),
            fail_on: args.fail_on,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "siao_cli=info,siao_playback=info,siao_api_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_from(Some(
        cli.config
            .as_deref()
            .unwrap_or_else(|| std::path::Path::new("siao.toml")),
    ))?;

    match cli.command {
        Commands::Resolve { url } => {
            commands::resolve(&config, &url)?;
        }
        Commands::Tracks {
            credentials,
            source,
        } => {
            let tracks = commands::load_tracks(&config, &credentials, &source).await?;
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        Commands::Play {
            credentials,
            simulation,
            source,
        } => {
            let tracks = commands::load_tracks(&config, &credentials, &source).await?;
            let outcome = commands::play(&config, tracks, simulation.into()).await?;
            if !outcome.failed.is_empty() {
                println!("Failed to load: {}", outcome.failed.join(", "));
            }
        }
    }

    Ok(())
}
