//! Live statistics derived from a [`Session`]. Nothing here is stored; every
//! render recomputes from the session and the current instant.

use crate::session::Session;
use std::time::{Duration, Instant};

const CHARS_PER_WORD: f64 = 5.0;
const MS_PER_MINUTE: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elapsed: Duration,
    pub correct: usize,
    pub typed: usize,
    pub total: usize,
    /// Percentage in `[0, 100]`.
    pub accuracy: f64,
    pub wpm: f64,
    /// 1-based cursor position, clamped to the prompt length.
    pub position: usize,
}

impl Metrics {
    pub fn compute(session: &Session, now: Instant) -> Self {
        let typed = session.typed().len();
        let total = session.target().len();
        let elapsed = elapsed(session, now);
        let correct = correct_count(session.target(), session.typed());

        Self {
            elapsed,
            correct,
            typed,
            total,
            accuracy: accuracy(correct, typed),
            wpm: wpm(typed, elapsed),
            position: position(typed, total),
        }
    }
}

/// Time since the first keystroke, frozen at the end time once finished.
pub fn elapsed(session: &Session, now: Instant) -> Duration {
    match session.started_at() {
        Some(start) => session
            .ended_at()
            .unwrap_or(now)
            .saturating_duration_since(start),
        None => Duration::ZERO,
    }
}

pub fn correct_count(target: &[char], typed: &[char]) -> usize {
    target
        .iter()
        .zip(typed)
        .filter(|(expected, actual)| expected == actual)
        .count()
}

pub fn accuracy(correct: usize, typed: usize) -> f64 {
    if typed == 0 {
        return 100.0;
    }
    100.0 * correct as f64 / typed as f64
}

/// Gross words per minute over whole elapsed milliseconds.
pub fn wpm(typed: usize, elapsed: Duration) -> f64 {
    let elapsed_ms = elapsed.as_millis();
    if typed == 0 || elapsed_ms == 0 {
        return 0.0;
    }

    let minutes = elapsed_ms.max(1) as f64 / MS_PER_MINUTE;
    ((typed as f64 / CHARS_PER_WORD) / minutes).max(0.0)
}

pub fn position(typed: usize, total: usize) -> usize {
    (typed + 1).min(total)
}
