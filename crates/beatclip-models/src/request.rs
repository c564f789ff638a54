//! Assembly request definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for an assembly request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One assembly request: a chosen audio track, a pool of candidate videos
/// and the target duration of the finished montage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyRequest {
    /// Request identifier
    pub id: RequestId,
    /// Path to the selected audio track
    pub audio_path: PathBuf,
    /// Directory holding the candidate video files
    pub video_dir: PathBuf,
    /// Candidate video file names within `video_dir`
    pub pool: crate::VideoPool,
    /// Target total duration of the output in seconds
    pub total_duration: f64,
    /// When the request was created
    pub created_at: DateTime<Utc>,
}

impl AssemblyRequest {
    /// Create a new request with a fresh id and the current timestamp.
    pub fn new(
        audio_path: impl Into<PathBuf>,
        video_dir: impl Into<PathBuf>,
        pool: crate::VideoPool,
        total_duration: f64,
    ) -> Self {
        Self {
            id: RequestId::new(),
            audio_path: audio_path.into(),
            video_dir: video_dir.into(),
            pool,
            total_duration,
            created_at: Utc::now(),
        }
    }
}
