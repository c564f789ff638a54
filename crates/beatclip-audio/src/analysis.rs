//! Spectral-flux beat extraction.
//!
//! One pass over the decoded samples: Hann-windowed FFT frames, half-wave
//! rectified spectral flux between consecutive frames, adaptive-threshold
//! peak picking, and a tempo estimate from the median inter-beat interval.
//!
//! The extractor makes no promise about beat counts. Silence yields an
//! empty sequence; a single transient yields one beat. Downstream code must
//! degrade gracefully when fewer than two beats exist.

use std::f32::consts::PI;

use realfft::RealFftPlanner;
use tracing::debug;

use beatclip_models::{BeatAnalysis, BeatSequence};

use crate::decode::AudioTrack;

/// Tuning for onset detection.
#[derive(Debug, Clone)]
pub struct OnsetConfig {
    /// FFT window size in samples
    pub window: usize,
    /// Hop between consecutive frames in samples
    pub hop: usize,
    /// Multiplier over the local mean flux a peak must exceed
    pub sensitivity: f32,
    /// Minimum spacing between reported beats in seconds
    pub min_gap_secs: f64,
    /// Half-width, in frames, of the local averaging window
    pub mean_half_width: usize,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            window: 1024,
            hop: 512,
            sensitivity: 1.6,
            min_gap_secs: 0.2,
            mean_half_width: 16,
        }
    }
}

/// Extract beats with the default onset tuning.
pub fn extract_beats(track: &AudioTrack) -> BeatAnalysis {
    extract_beats_with(track, &OnsetConfig::default())
}

/// Extract beats with explicit onset tuning.
///
/// Produces a non-decreasing sequence of timestamps; each detected onset
/// frame is converted to seconds via the track's sample rate.
pub fn extract_beats_with(track: &AudioTrack, config: &OnsetConfig) -> BeatAnalysis {
    let flux = spectral_flux(track.samples(), config.window, config.hop);
    let beats = pick_onsets(&flux, track.sample_rate(), config);
    let tempo_bpm = estimate_tempo(&beats);

    debug!(
        frames = flux.len(),
        beats = beats.len(),
        tempo_bpm,
        "Beat extraction finished"
    );

    BeatAnalysis::new(tempo_bpm, BeatSequence::new(beats))
}

/// Half-wave rectified spectral flux per frame.
fn spectral_flux(samples: &[f32], window: usize, hop: usize) -> Vec<f32> {
    if samples.len() < window || window == 0 || hop == 0 {
        return Vec::new();
    }

    let mut planner = RealFftPlanner::<f32>::new();
    let plan = planner.plan_fft_forward(window);
    let mut input = plan.make_input_vec();
    let mut spectrum = plan.make_output_vec();
    let mut scratch = plan.make_scratch_vec();

    let hann: Vec<f32> = (0..window)
        .map(|i| 0.5 - 0.5 * ((2.0 * PI * i as f32) / (window as f32 - 1.0)).cos())
        .collect();

    let frames = (samples.len() - window) / hop + 1;
    let mut prev_mags = vec![0.0f32; spectrum.len()];
    let mut flux = Vec::with_capacity(frames);

    for frame in 0..frames {
        let offset = frame * hop;
        for (i, value) in samples[offset..offset + window].iter().enumerate() {
            input[i] = value * hann[i];
        }

        plan.process_with_scratch(&mut input, &mut spectrum, &mut scratch)
            .expect("fft buffers sized by planner");

        let mut frame_flux = 0.0f32;
        for (i, bin) in spectrum.iter().enumerate() {
            let mag = bin.norm();
            frame_flux += (mag - prev_mags[i]).max(0.0);
            prev_mags[i] = mag;
        }
        flux.push(frame_flux);
    }

    flux
}

/// Pick onset peaks out of the flux curve.
///
/// A frame is an onset when it is a local maximum, exceeds the local mean
/// flux by the configured sensitivity, and keeps the minimum distance to
/// the previously accepted beat.
fn pick_onsets(flux: &[f32], sample_rate: u32, config: &OnsetConfig) -> Vec<f64> {
    let mut beats = Vec::new();
    if flux.len() < 3 || sample_rate == 0 {
        return beats;
    }

    let seconds_per_frame = config.hop as f64 / sample_rate as f64;
    let mut last_beat = f64::NEG_INFINITY;

    for i in 1..flux.len() - 1 {
        if flux[i] <= flux[i - 1] || flux[i] < flux[i + 1] {
            continue;
        }

        let lo = i.saturating_sub(config.mean_half_width);
        let hi = (i + config.mean_half_width + 1).min(flux.len());
        let local_mean: f32 = flux[lo..hi].iter().sum::<f32>() / (hi - lo) as f32;

        if flux[i] <= local_mean * config.sensitivity + f32::EPSILON {
            continue;
        }

        let time = i as f64 * seconds_per_frame;
        if time - last_beat >= config.min_gap_secs {
            beats.push(time);
            last_beat = time;
        }
    }

    beats
}

/// Tempo in BPM from the median inter-beat interval.
fn estimate_tempo(beats: &[f64]) -> Option<f64> {
    if beats.len() < 2 {
        return None;
    }

    let mut intervals: Vec<f64> = beats.windows(2).map(|w| w[1] - w[0]).collect();
    intervals.retain(|i| *i > f64::EPSILON);
    if intervals.is_empty() {
        return None;
    }

    intervals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = intervals[intervals.len() / 2];
    Some(60.0 / median)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic click track: short sine bursts on a fixed grid.
    fn click_track(bpm: f64, seconds: f64, sample_rate: u32) -> AudioTrack {
        let total = (seconds * sample_rate as f64) as usize;
        let mut samples = vec![0.0f32; total];
        let interval = 60.0 / bpm;
        let burst_len = 256;

        let mut t = 0.0;
        while t < seconds {
            let start = (t * sample_rate as f64) as usize;
            for i in 0..burst_len {
                if start + i >= total {
                    break;
                }
                let phase = 2.0 * PI * 1000.0 * (i as f32 / sample_rate as f32);
                samples[start + i] = 0.8 * phase.sin();
            }
            t += interval;
        }

        AudioTrack::from_samples(samples, sample_rate)
    }

    #[test]
    fn test_silence_yields_no_beats() {
        let track = AudioTrack::from_samples(vec![0.0; 44_100], 44_100);
        let analysis = extract_beats(&track);
        assert!(analysis.beats.is_empty());
        assert!(analysis.tempo_bpm.is_none());
    }

    #[test]
    fn test_too_short_input_yields_no_beats() {
        let track = AudioTrack::from_samples(vec![0.5; 100], 44_100);
        let analysis = extract_beats(&track);
        assert!(analysis.beats.is_empty());
    }

    #[test]
    fn test_click_track_beats_on_grid() {
        let track = click_track(120.0, 4.0, 44_100);
        let analysis = extract_beats(&track);
        let beats = analysis.beats.as_slice();

        assert!(
            beats.len() >= 6 && beats.len() <= 10,
            "expected ~8 beats, got {}",
            beats.len()
        );

        // Strictly increasing
        for pair in beats.windows(2) {
            assert!(pair[1] > pair[0]);
        }

        // Every beat lands near a multiple of the 0.5s click interval
        for &beat in beats {
            let nearest = (beat / 0.5).round() * 0.5;
            assert!(
                (beat - nearest).abs() < 0.08,
                "beat {beat} too far from grid point {nearest}"
            );
        }
    }

    #[test]
    fn test_click_track_tempo_estimate() {
        let track = click_track(120.0, 4.0, 44_100);
        let analysis = extract_beats(&track);
        let tempo = analysis.tempo_bpm.expect("tempo should be detected");
        assert!(
            (100.0..140.0).contains(&tempo),
            "tempo {tempo} out of range"
        );
    }

    #[test]
    fn test_single_transient_yields_no_tempo() {
        let mut samples = vec![0.0f32; 44_100];
        for (i, s) in samples.iter_mut().skip(10_000).take(256).enumerate() {
            *s = 0.8 * (2.0 * PI * 1000.0 * i as f32 / 44_100.0).sin();
        }
        let track = AudioTrack::from_samples(samples, 44_100);
        let analysis = extract_beats(&track);
        assert!(analysis.beats.len() <= 1);
        assert!(analysis.tempo_bpm.is_none());
    }

    #[test]
    fn test_estimate_tempo_median() {
        let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let tempo = estimate_tempo(&beats).unwrap();
        assert!((tempo - 120.0).abs() < 0.5);
    }

    #[test]
    fn test_estimate_tempo_needs_interval() {
        assert!(estimate_tempo(&[]).is_none());
        assert!(estimate_tempo(&[1.0]).is_none());
        assert!(estimate_tempo(&[1.0, 1.0]).is_none());
    }
}
