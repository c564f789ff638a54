//! The clip assembler: one request end to end.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use beatclip_audio::{extract_beats, AudioTrack};
use beatclip_models::{AssemblyRequest, BeatAnalysis, EncodingConfig, ExposureFilter};

use crate::config::EngineConfig;
use crate::error::{AssemblyError, AssemblyResult};
use crate::logging::RequestLogger;
use crate::plan::{plan_timeline, shuffle_pool};
use crate::render::render_timeline;

/// Assembles montages: beat extraction, greedy selection, render.
///
/// One `Assembler` serves many requests; per-request state (timeline, work
/// dir, permutation) is private to each `assemble` call.
#[derive(Debug, Clone)]
pub struct Assembler {
    config: EngineConfig,
    encoding: EncodingConfig,
    exposure: ExposureFilter,
}

impl Assembler {
    /// Create an assembler with default encoding and exposure settings.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            encoding: EncodingConfig::default(),
            exposure: ExposureFilter::default(),
        }
    }

    /// Override the encoding configuration.
    pub fn with_encoding(mut self, encoding: EncodingConfig) -> Self {
        self.encoding = encoding;
        self
    }

    /// The engine configuration this assembler runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assemble one montage, returning the output path.
    ///
    /// Beat extraction is CPU-bound over the whole decoded track and runs
    /// on a blocking worker thread; render steps are awaited subprocesses.
    /// Every error is terminal for the request.
    pub async fn assemble(&self, request: &AssemblyRequest) -> AssemblyResult<PathBuf> {
        let logger = RequestLogger::new(&request.id, "assemble");
        logger.log_start(&format!(
            "audio={}, pool={} videos, target={}s",
            request.audio_path.display(),
            request.pool.len(),
            request.total_duration
        ));

        if request.total_duration <= 0.0 {
            return Err(AssemblyError::invalid_request(
                "total duration must be positive",
            ));
        }
        if request.pool.is_empty() {
            logger.log_error("video pool is empty");
            return Err(AssemblyError::no_usable_clips("video pool is empty"));
        }

        let analysis = self.extract(request).await?;
        logger.log_progress(&format!(
            "{} beats detected{}",
            analysis.beats.len(),
            analysis
                .tempo_bpm
                .map(|t| format!(", tempo {t:.1} BPM"))
                .unwrap_or_default()
        ));

        if !analysis.beats.has_interval() {
            logger.log_error("fewer than two beats detected");
            return Err(AssemblyError::no_usable_clips(
                "fewer than two beats detected",
            ));
        }

        // The one-time shuffle: the only randomness in the pipeline
        let mut rng = StdRng::from_entropy();
        let order = shuffle_pool(&request.pool, &mut rng);
        let timeline = plan_timeline(&order, &analysis.beats, request.total_duration);

        if timeline.is_empty() {
            logger.log_error("selection produced no segments");
            return Err(AssemblyError::no_usable_clips(
                "no positive beat interval to cut against",
            ));
        }

        logger.log_progress(&format!(
            "{} segments planned, {:.2}s of {:.2}s",
            timeline.len(),
            timeline.accumulated(),
            request.total_duration
        ));

        let output_path = self.config.output_path(&request.id);
        render_timeline(
            &timeline,
            &request.video_dir,
            &request.audio_path,
            &output_path,
            request.total_duration,
            &self.exposure,
            &self.encoding,
            Some(self.config.ffmpeg_timeout_secs),
        )
        .await?;

        logger.log_completion(&format!("wrote {}", output_path.display()));
        Ok(output_path)
    }

    /// Decode the audio track and extract beats off the async runtime.
    async fn extract(&self, request: &AssemblyRequest) -> AssemblyResult<BeatAnalysis> {
        let audio_path = request.audio_path.clone();
        tokio::task::spawn_blocking(move || {
            let track = AudioTrack::load(&audio_path)?;
            Ok(extract_beats(&track))
        })
        .await
        .map_err(|e| AssemblyError::internal(format!("beat extraction task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatclip_models::VideoPool;

    fn request_with(pool: VideoPool, total: f64) -> AssemblyRequest {
        AssemblyRequest::new("missing.mp3", "Video", pool, total)
    }

    #[tokio::test]
    async fn test_empty_pool_fails_before_decode() {
        let assembler = Assembler::new(EngineConfig::default());
        // Audio path does not exist; the empty pool must short-circuit first
        let err = assembler
            .assemble(&request_with(VideoPool::default(), 15.0))
            .await
            .unwrap_err();
        assert!(err.is_no_usable_clips());
    }

    #[tokio::test]
    async fn test_non_positive_duration_rejected() {
        let assembler = Assembler::new(EngineConfig::default());
        let pool = VideoPool::new(vec!["a.mp4".to_string()]);
        let err = assembler
            .assemble(&request_with(pool, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_missing_audio_is_decode_failure() {
        let assembler = Assembler::new(EngineConfig::default());
        let pool = VideoPool::new(vec!["a.mp4".to_string()]);
        let err = assembler
            .assemble(&request_with(pool, 15.0))
            .await
            .unwrap_err();
        assert!(err.is_decode_failure());
    }
}
