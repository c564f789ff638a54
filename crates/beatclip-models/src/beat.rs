//! Beat sequence and tempo analysis results.

use serde::{Deserialize, Serialize};

/// Ordered sequence of beat timestamps in seconds.
///
/// Timestamps are expected to be non-decreasing as produced by the beat
/// extractor. The sequence is kept verbatim: duplicate or out-of-order
/// entries are not dropped here, because the assembler's selection loop
/// treats a non-positive inter-beat gap as its termination condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeatSequence(Vec<f64>);

impl BeatSequence {
    /// Wrap a list of beat timestamps.
    pub fn new(times: Vec<f64>) -> Self {
        Self(times)
    }

    /// Number of beats in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no beats were detected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Beat timestamp at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Gap in seconds between beat `index` and beat `index + 1`.
    ///
    /// May be zero or negative if the source sequence was degenerate; the
    /// selection loop uses that as its stop signal.
    pub fn gap(&self, index: usize) -> Option<f64> {
        match (self.0.get(index), self.0.get(index + 1)) {
            (Some(a), Some(b)) => Some(b - a),
            _ => None,
        }
    }

    /// All timestamps as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// True when the sequence holds at least one usable interval,
    /// i.e. two or more beats.
    pub fn has_interval(&self) -> bool {
        self.0.len() >= 2
    }
}

impl From<Vec<f64>> for BeatSequence {
    fn from(times: Vec<f64>) -> Self {
        Self::new(times)
    }
}

/// Result of beat extraction: a tempo estimate plus the beat timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatAnalysis {
    /// Estimated tempo in beats per minute. `None` when fewer than two
    /// beats were found and no interval exists to derive it from.
    pub tempo_bpm: Option<f64>,
    /// Detected beat timestamps in seconds.
    pub beats: BeatSequence,
}

impl BeatAnalysis {
    /// Create an analysis result.
    pub fn new(tempo_bpm: Option<f64>, beats: BeatSequence) -> Self {
        Self { tempo_bpm, beats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps() {
        let beats = BeatSequence::new(vec![0.0, 0.5, 1.25]);
        assert_eq!(beats.len(), 3);
        assert!((beats.gap(0).unwrap() - 0.5).abs() < 1e-9);
        assert!((beats.gap(1).unwrap() - 0.75).abs() < 1e-9);
        assert!(beats.gap(2).is_none());
    }

    #[test]
    fn test_degenerate_gap_preserved() {
        let beats = BeatSequence::new(vec![1.0, 1.0, 0.5]);
        assert_eq!(beats.gap(0), Some(0.0));
        assert!(beats.gap(1).unwrap() < 0.0);
    }

    #[test]
    fn test_has_interval() {
        assert!(!BeatSequence::new(vec![]).has_interval());
        assert!(!BeatSequence::new(vec![0.3]).has_interval());
        assert!(BeatSequence::new(vec![0.3, 0.6]).has_interval());
    }
}
