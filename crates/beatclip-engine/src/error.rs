//! Assembly error types.

use thiserror::Error;

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors that can occur while assembling a montage.
///
/// All variants are terminal for the request: no retries, no partial
/// output. Callers report `NoUsableClips` distinctly from processing
/// failures.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("No usable clips: {0}")]
    NoUsableClips(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Audio error: {0}")]
    Audio(#[from] beatclip_audio::AudioError),

    #[error("Media error: {0}")]
    Media(#[from] beatclip_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AssemblyError {
    /// Create a no-usable-clips error.
    pub fn no_usable_clips(message: impl Into<String>) -> Self {
        Self::NoUsableClips(message.into())
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True when the request had nothing to work with, as opposed to a
    /// processing failure.
    pub fn is_no_usable_clips(&self) -> bool {
        matches!(self, Self::NoUsableClips(_))
    }

    /// True when the source audio could not be decoded.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Audio(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = AssemblyError::no_usable_clips("empty pool");
        assert!(err.is_no_usable_clips());
        assert!(!err.is_decode_failure());

        let err = AssemblyError::internal("join failure");
        assert!(!err.is_no_usable_clips());
    }
}
