//! Per-segment rendering.
//!
//! Each selected segment is cut from the start of its source clip,
//! run through the exposure + canvas filter chain, and re-encoded. The
//! re-encode is what makes frame-accurate cuts and uniform stream
//! parameters possible; the later concat step is then a pure stream copy.

use std::path::Path;

use tracing::debug;

use beatclip_models::{EncodingConfig, ExposureFilter};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::segment_filter;

/// Build the FFmpeg command for one segment render.
///
/// The cut is `[0, duration)` from the clip's own start; source audio is
/// dropped (the montage audio comes from the selected track at mux time).
pub fn segment_command(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    duration: f64,
    exposure: &ExposureFilter,
    encoding: &EncodingConfig,
) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .video_filter(segment_filter(exposure, encoding))
        .output_args(encoding.video_args())
        .output_arg("-an")
        .output_duration(duration)
}

/// Render one segment to `output`.
pub async fn render_segment(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    duration: f64,
    exposure: &ExposureFilter,
    encoding: &EncodingConfig,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    debug!(
        input = %input.display(),
        output = %output.display(),
        duration_secs = duration,
        "Rendering segment"
    );

    let cmd = segment_command(input, output, duration, exposure, encoding);

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}
