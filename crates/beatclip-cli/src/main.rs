//! Interactive beatclip front end.
//!
//! Stands in for the original chat-bot glue: lists the available songs,
//! waits a bounded time for a numbered selection, then hands the request
//! to the assembly service and reports the output path.

mod select;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use beatclip_engine::{list_audio_tracks, list_video_pool, AssemblyService, EngineConfig};
use beatclip_models::AssemblyRequest;

use crate::select::{prompt_selection, Selection};

/// Assemble a beat-synchronized music video from a song and a clip pool.
#[derive(Debug, Parser)]
#[command(name = "beatclip", version, about)]
struct Cli {
    /// Directory holding candidate audio tracks
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Directory holding the candidate video pool
    #[arg(long)]
    video_dir: Option<PathBuf>,

    /// Directory the finished montage is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Target montage duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Pick this song number directly instead of prompting
    #[arg(long)]
    song: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatclip=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = EngineConfig::from_env();
    if let Some(dir) = cli.audio_dir {
        config.audio_dir = dir;
    }
    if let Some(dir) = cli.video_dir {
        config.video_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(duration) = cli.duration {
        config.total_duration = duration;
    }

    let songs = list_audio_tracks(&config.audio_dir).await?;
    if songs.is_empty() {
        anyhow::bail!(
            "no audio files found in {}",
            config.audio_dir.display()
        );
    }

    let song_index = match cli.song {
        Some(n) if n >= 1 && n <= songs.len() => n - 1,
        Some(n) => anyhow::bail!("song {n} is out of range (1..={})", songs.len()),
        None => {
            println!("Available songs:");
            for (i, song) in songs.iter().enumerate() {
                println!("{}. {}", i + 1, song);
            }
            println!("\nEnter the number of the song you want:");

            match prompt_selection(songs.len(), config.selection_timeout).await {
                Selection::Chosen(index) => index,
                Selection::TimedOut => {
                    anyhow::bail!("took too long to respond, please try again")
                }
                Selection::Invalid(input) => {
                    anyhow::bail!("invalid selection {input:?}, please try again")
                }
            }
        }
    };

    let selected = &songs[song_index];
    println!("You selected: {selected}");

    let pool = list_video_pool(&config.video_dir).await?;
    info!(
        song = %selected,
        pool = pool.len(),
        duration = config.total_duration,
        "Starting video creation"
    );

    let request = AssemblyRequest::new(
        config.audio_dir.join(selected),
        config.video_dir.clone(),
        pool,
        config.total_duration,
    );

    let service = AssemblyService::new(config);
    let output = service.request_assembly(request).await.map_err(|e| {
        if e.is_no_usable_clips() {
            anyhow::anyhow!("nothing to assemble: {e}")
        } else {
            anyhow::anyhow!("video creation failed: {e}")
        }
    })?;

    println!("Video creation complete: {}", output.display());
    Ok(())
}
