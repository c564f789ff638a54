//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

use beatclip_models::RequestId;

/// Default montage length in seconds.
pub const DEFAULT_TOTAL_DURATION: f64 = 15.0;
/// Well-known output file name, overwritten per request unless unique
/// outputs are enabled.
pub const OUTPUT_FILE_NAME: &str = "montage.mp4";

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding candidate audio tracks
    pub audio_dir: PathBuf,
    /// Directory holding the candidate video pool
    pub video_dir: PathBuf,
    /// Directory the finished montage is written to
    pub output_dir: PathBuf,
    /// Target montage duration in seconds
    pub total_duration: f64,
    /// Maximum assembly requests in flight
    pub max_concurrent_requests: usize,
    /// Wall-clock limit for a single FFmpeg invocation
    pub ffmpeg_timeout_secs: u64,
    /// How long the interactive caller waits for a song selection
    pub selection_timeout: Duration,
    /// Name outputs per request id instead of overwriting the well-known
    /// file. Required when requests may overlap.
    pub unique_outputs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("Audio"),
            video_dir: PathBuf::from("Video"),
            output_dir: PathBuf::from("output"),
            total_duration: DEFAULT_TOTAL_DURATION,
            max_concurrent_requests: 1,
            ffmpeg_timeout_secs: 600,
            selection_timeout: Duration::from_secs(30),
            unique_outputs: false,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            audio_dir: std::env::var("BEATCLIP_AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            video_dir: std::env::var("BEATCLIP_VIDEO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_dir),
            output_dir: std::env::var("BEATCLIP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            total_duration: std::env::var("BEATCLIP_TOTAL_DURATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TOTAL_DURATION),
            max_concurrent_requests: std::env::var("BEATCLIP_MAX_CONCURRENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_concurrent_requests),
            ffmpeg_timeout_secs: std::env::var("BEATCLIP_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
            selection_timeout: Duration::from_secs(
                std::env::var("BEATCLIP_SELECTION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            unique_outputs: std::env::var("BEATCLIP_UNIQUE_OUTPUTS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Output path for a request.
    pub fn output_path(&self, id: &RequestId) -> PathBuf {
        if self.unique_outputs {
            self.output_dir.join(format!("montage-{id}.mp4"))
        } else {
            self.output_dir.join(OUTPUT_FILE_NAME)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_behavior() {
        let config = EngineConfig::default();
        assert!((config.total_duration - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.selection_timeout, Duration::from_secs(30));
        assert!(!config.unique_outputs);
    }

    #[test]
    fn test_fixed_output_path_overwrites() {
        let config = EngineConfig::default();
        let a = config.output_path(&RequestId::new());
        let b = config.output_path(&RequestId::new());
        assert_eq!(a, b, "fixed path is shared across requests");
        assert!(a.ends_with("montage.mp4"));
    }

    #[test]
    fn test_unique_output_path_per_request() {
        let config = EngineConfig {
            unique_outputs: true,
            ..Default::default()
        };
        let a = config.output_path(&RequestId::from_string("one"));
        let b = config.output_path(&RequestId::from_string("two"));
        assert_ne!(a, b);
        assert!(a.to_string_lossy().contains("montage-one"));
    }
}
