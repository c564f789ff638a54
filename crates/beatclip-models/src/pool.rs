//! Candidate video pool.

use serde::{Deserialize, Serialize};

/// Pool of candidate source videos, identified by file name.
///
/// The pool is unordered as supplied. The assembler consumes it through a
/// single randomized permutation per run; the shuffle itself lives in the
/// engine so the randomness source stays injectable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoPool(Vec<String>);

impl VideoPool {
    /// Create a pool from a list of file names.
    pub fn new(files: Vec<String>) -> Self {
        Self(files)
    }

    /// Number of candidate videos.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the pool holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Candidate file names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Copy of the candidate list, for the engine to permute.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl From<Vec<String>> for VideoPool {
    fn from(files: Vec<String>) -> Self {
        Self::new(files)
    }
}

impl FromIterator<String> for VideoPool {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_basics() {
        let pool = VideoPool::new(vec!["a.mp4".into(), "b.mov".into()]);
        assert_eq!(pool.len(), 2);
        assert!(!pool.is_empty());
        assert_eq!(pool.as_slice()[1], "b.mov");
    }

    #[test]
    fn test_empty_pool() {
        let pool = VideoPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}
