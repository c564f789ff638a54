//! Timeline concatenation and the final audio mux.
//!
//! Strategy: every segment was already re-encoded onto a shared canvas, so
//! concatenation is a concat-demuxer stream copy. The mux step then maps
//! the concatenated video with the full audio track and applies the hard
//! output duration limit.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use beatclip_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the contents of a concat-demuxer list file.
fn build_concat_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            let escaped = p.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}

/// Concatenate rendered segments into a single video stream.
///
/// All inputs must share stream parameters (guaranteed by the segment
/// renders); the copy introduces no generation loss.
pub async fn concat_segments(
    segment_paths: &[PathBuf],
    output: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let output = output.as_ref();

    if segment_paths.is_empty() {
        return Err(MediaError::InvalidVideo(
            "no segments to concatenate".to_string(),
        ));
    }

    let list_dir = tempfile::tempdir()?;
    let list_path = list_dir.path().join("concat.txt");
    tokio::fs::write(&list_path, build_concat_list(segment_paths)).await?;

    debug!(
        segments = segment_paths.len(),
        output = %output.display(),
        "Concatenating segments"
    );

    let cmd = FfmpegCommand::new(&list_path, output)
        .input_arg("-f")
        .input_arg("concat")
        .input_arg("-safe")
        .input_arg("0")
        .output_arg("-c")
        .output_arg("copy");

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}

/// Build the FFmpeg command for the final mux.
///
/// Maps the concatenated video and the full audio track, copies the video
/// stream, encodes audio per config, and truncates the output to exactly
/// `total_duration`. The audio track, not the video coverage, bounds the
/// result: when the timeline undershoots, the container still runs to the
/// requested duration.
pub fn mux_command(
    video: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    total_duration: f64,
    encoding: &EncodingConfig,
) -> FfmpegCommand {
    FfmpegCommand::new(video, output)
        .add_input(audio)
        .map("0:v")
        .map("1:a")
        .output_arg("-c:v")
        .output_arg("copy")
        .output_args(encoding.audio_args())
        .output_duration(total_duration)
        .output_arg("-movflags")
        .output_arg("+faststart")
}

/// Attach the audio track and truncate to the target duration.
///
/// On failure the (possibly partial) output file is removed; a failed mux
/// must not leave a corrupt artifact behind.
pub async fn mux_audio_truncated(
    video: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    total_duration: f64,
    encoding: &EncodingConfig,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let output = output.as_ref();
    let cmd = mux_command(&video, &audio, output, total_duration, encoding);

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }

    let total_ms = (total_duration * 1000.0) as i64;
    let mux = runner.run_with_progress(&cmd, move |p| {
        debug!(
            out_time_ms = p.out_time_ms,
            percent = p.percentage(total_ms),
            speed = p.speed,
            "Mux progress"
        );
    });

    match mux.await {
        Ok(()) => {
            info!(
                output = %output.display(),
                total_duration,
                "Final mux complete"
            );
            Ok(())
        }
        Err(e) => {
            if output.exists() {
                let _ = tokio::fs::remove_file(output).await;
            }
            Err(e)
        }
    }
}
