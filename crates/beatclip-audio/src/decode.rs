//! Audio file decoding via symphonia.
//!
//! Decodes the default audio track of any container symphonia supports
//! (mp3, flac, aac, m4a, ogg/vorbis, wav, ...) into a mono f32 buffer at
//! the file's native sample rate. Multi-channel audio is averaged down to
//! mono; beat analysis has no use for stereo separation.

use std::fs::File;
use std::path::{Path, PathBuf};

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::error::{AudioError, AudioResult};

/// A fully decoded audio track.
///
/// Immutable once loaded: the assembler reads it for beat extraction and
/// afterwards only the source path is needed again (for the final mux).
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Path the track was loaded from
    path: PathBuf,
    /// Mono samples at `sample_rate`
    samples: Vec<f32>,
    /// Native sample rate in Hz
    sample_rate: u32,
}

impl AudioTrack {
    /// Decode an audio file into a mono sample buffer.
    ///
    /// # Errors
    /// Fails with a decode-class error if the file is missing, the container
    /// cannot be probed, no audio track exists, or decoding fails outright.
    /// Corrupt packets inside an otherwise decodable stream are skipped.
    pub fn load(path: impl AsRef<Path>) -> AudioResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AudioError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::probe_failed(path, e.to_string()))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::NoAudioTrack(path.to_path_buf()))?;
        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::decode_failed(path, e.to_string()))?;

        let mut samples: Vec<f32> = Vec::new();
        let mut sample_rate = codec_params.sample_rate.unwrap_or(0);
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(AudioError::decode_failed(path, e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    // Recoverable corruption: skip the packet
                    warn!(path = %path.display(), "Skipping undecodable packet: {}", e);
                    continue;
                }
                Err(e) => return Err(AudioError::decode_failed(path, e.to_string())),
            };

            let spec = *decoded.spec();
            if sample_rate == 0 {
                sample_rate = spec.rate;
            }
            let channels = spec.channels.count();

            let buf = sample_buf.get_or_insert_with(|| {
                SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
            });
            buf.copy_interleaved_ref(decoded);

            if channels <= 1 {
                samples.extend_from_slice(buf.samples());
            } else {
                for frame in buf.samples().chunks_exact(channels) {
                    let sum: f32 = frame.iter().sum();
                    samples.push(sum / channels as f32);
                }
            }
        }

        if sample_rate == 0 || samples.is_empty() {
            return Err(AudioError::decode_failed(path, "no samples decoded"));
        }

        debug!(
            path = %path.display(),
            sample_rate,
            samples = samples.len(),
            duration_secs = samples.len() as f64 / sample_rate as f64,
            "Decoded audio track"
        );

        Ok(Self {
            path: path.to_path_buf(),
            samples,
            sample_rate,
        })
    }

    /// Path the track was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mono samples at `sample_rate()`.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Native sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Track duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Build a track directly from samples. Intended for tests and synthetic
    /// input; real callers go through `load`.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            path: PathBuf::new(),
            samples,
            sample_rate,
        }
    }
}
