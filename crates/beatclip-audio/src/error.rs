//! Error types for audio operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding or analyzing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to probe audio container: {message}")]
    ProbeFailed { path: PathBuf, message: String },

    #[error("No audio track in file: {0}")]
    NoAudioTrack(PathBuf),

    #[error("Failed to decode audio: {message}")]
    DecodeFailed { path: PathBuf, message: String },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Create a probe failure error.
    pub fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a decode failure error.
    pub fn decode_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}
