//! Greedy beat-windowed segment selection.
//!
//! The planner is pure: given a fixed clip order, a beat sequence and a
//! duration budget it always produces the same timeline. Randomness enters
//! exactly once, through the shuffle, and the RNG is supplied by the
//! caller so tests can pin the permutation.

use rand::seq::SliceRandom;
use rand::Rng;

use beatclip_models::{BeatSequence, ClipSegment, Timeline, VideoPool};

/// Produce the one-time random permutation of the pool.
pub fn shuffle_pool<R: Rng + ?Sized>(pool: &VideoPool, rng: &mut R) -> Vec<String> {
    let mut order = pool.to_vec();
    order.shuffle(rng);
    order
}

/// Build a timeline by walking beat intervals in order.
///
/// Each iteration takes the clip at `video_index` (round-robin over
/// `order`, wrapping when exhausted) and cuts it to the current beat gap,
/// clamped to the remaining duration budget. A non-positive candidate
/// length means "done" — whether it came from degenerate beat timestamps
/// or from the budget being exactly spent — and terminates the loop rather
/// than being skipped.
///
/// The result may be empty (no beats to pair, empty order, or a
/// non-positive first interval); the caller decides whether that is an
/// error.
pub fn plan_timeline(order: &[String], beats: &BeatSequence, total_duration: f64) -> Timeline {
    let mut timeline = Timeline::new();

    if order.is_empty() {
        return timeline;
    }

    let mut video_index = 0usize;
    let mut beat_index = 0usize;

    while timeline.accumulated() < total_duration && beat_index + 1 < beats.len() {
        let Some(gap) = beats.gap(beat_index) else {
            break;
        };

        let remaining = total_duration - timeline.accumulated();
        let duration = gap.min(remaining);

        if duration <= 0.0 {
            break;
        }

        let source = &order[video_index % order.len()];
        timeline.push(ClipSegment::from_start(source.clone(), duration));

        video_index += 1;
        beat_index += 1;
    }

    timeline
}
