//! Interactive song selection with a response timeout.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

/// Outcome of the selection prompt.
///
/// Timed-out and invalid selections are distinct, and neither reaches the
/// assembly engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the presented list
    Chosen(usize),
    /// No response within the timeout
    TimedOut,
    /// Response was not a number within range
    Invalid(String),
}

/// Parse a typed reply against a list of `count` options numbered from 1.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Chosen(n - 1),
        _ => Selection::Invalid(trimmed.to_string()),
    }
}

/// Read one line from stdin, bounded by `timeout`.
pub async fn prompt_selection(count: usize, timeout: Duration) -> Selection {
    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());

    match tokio::time::timeout(timeout, reader.read_line(&mut line)).await {
        Ok(Ok(0)) => Selection::Invalid(String::new()),
        Ok(Ok(_)) => parse_selection(&line, count),
        Ok(Err(_)) => Selection::Invalid(String::new()),
        Err(_) => Selection::TimedOut,
    }
}
