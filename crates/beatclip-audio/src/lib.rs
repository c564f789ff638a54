//! Audio decoding and beat extraction.
//!
//! This crate provides:
//! - `AudioTrack`: a fully decoded mono sample buffer (symphonia)
//! - `extract_beats`: spectral-flux onset detection plus a tempo estimate
//!
//! Beat extraction is a single synchronous pass over the samples. Callers
//! that must stay responsive run it on a blocking worker thread.

pub mod analysis;
pub mod decode;
pub mod error;

pub use analysis::{extract_beats, extract_beats_with, OnsetConfig};
pub use decode::AudioTrack;
pub use error::{AudioError, AudioResult};
