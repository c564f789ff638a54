//! Timeline rendering.
//!
//! Turns a planned timeline into the finished artifact: render each
//! segment into a private work directory, concatenate, then mux the audio
//! track with the hard duration bound.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use beatclip_media::{
    check_ffmpeg, check_ffprobe, concat_segments, mux_audio_truncated, probe_media,
    render_segment, MediaError,
};
use beatclip_models::{EncodingConfig, ExposureFilter, Timeline};

use crate::error::AssemblyResult;

/// Render a timeline and write the muxed montage to `output_path`.
///
/// The audio track is attached at its full length and the combined stream
/// is truncated to `total_duration`; if the timeline undershoots, the
/// output still runs to the target with audio past the last frame.
#[allow(clippy::too_many_arguments)]
pub async fn render_timeline(
    timeline: &Timeline,
    video_dir: &Path,
    audio_path: &Path,
    output_path: &Path,
    total_duration: f64,
    exposure: &ExposureFilter,
    encoding: &EncodingConfig,
    timeout_secs: Option<u64>,
) -> AssemblyResult<()> {
    // Fail before the first segment render if the tools are missing
    check_ffmpeg()?;
    check_ffprobe()?;

    let work_dir = tempfile::tempdir()?;
    let mut segment_paths: Vec<PathBuf> = Vec::with_capacity(timeline.len());

    for (i, segment) in timeline.segments().iter().enumerate() {
        let input = video_dir.join(&segment.source);
        let rendered = work_dir.path().join(format!("seg_{i:04}.mp4"));

        let info = probe_media(&input).await?;
        if !info.has_video {
            return Err(MediaError::InvalidVideo(format!(
                "{} has no video stream",
                input.display()
            ))
            .into());
        }
        if info.duration > 0.0 && info.duration < segment.duration {
            warn!(
                source = %input.display(),
                clip_duration = info.duration,
                wanted = segment.duration,
                "Clip is shorter than its beat gap; segment will run short"
            );
        }

        render_segment(
            &input,
            &rendered,
            segment.duration,
            exposure,
            encoding,
            timeout_secs,
        )
        .await?;

        segment_paths.push(rendered);
    }

    debug!(
        segments = segment_paths.len(),
        accumulated = timeline.accumulated(),
        "Segments rendered, concatenating"
    );

    let concat_path = work_dir.path().join("timeline.mp4");
    concat_segments(&segment_paths, &concat_path, timeout_secs).await?;

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    mux_audio_truncated(
        &concat_path,
        audio_path,
        output_path,
        total_duration,
        encoding,
        timeout_secs,
    )
    .await?;

    Ok(())
}
