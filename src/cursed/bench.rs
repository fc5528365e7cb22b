//! Wall-clock timing for the in-demo comparisons.
//!
//! These numbers are for illustration. Real measurements live in `benches/`.

use serde::Serialize;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Runs `f` once and returns its result with the elapsed time.
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = black_box(f());
    (result, start.elapsed())
}

/// Runs `f` `iterations` times and returns the total elapsed time.
pub fn repeat<R>(iterations: usize, mut f: impl FnMut() -> R) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(f());
    }
    start.elapsed()
}

/// Cursed vs correct timing for one task.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub label: String,
    pub cursed_ms: f64,
    pub correct_ms: f64,
}

impl Comparison {
    pub fn new(label: impl Into<String>, cursed: Duration, correct: Duration) -> Self {
        Self {
            label: label.into(),
            cursed_ms: cursed.as_secs_f64() * 1000.0,
            correct_ms: correct.as_secs_f64() * 1000.0,
        }
    }

    /// How many times slower the cursed version was. `None` when the correct
    /// version finished below timer resolution.
    pub fn slowdown(&self) -> Option<f64> {
        if self.correct_ms > 0.0 {
            Some(self.cursed_ms / self.correct_ms)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slowdown_divides_cursed_by_correct() {
        let cmp = Comparison::new(
            "x",
            Duration::from_millis(30),
            Duration::from_millis(10),
        );
        let slowdown = cmp.slowdown().unwrap();
        assert!((slowdown - 3.0).abs() < 1e-9);
    }

    #[test]
    fn slowdown_is_none_for_zero_reference() {
        let cmp = Comparison::new("x", Duration::from_millis(1), Duration::ZERO);
        assert!(cmp.slowdown().is_none());
    }

    #[test]
    fn timed_returns_the_value() {
        let (value, _) = timed(|| 6 * 7);
        assert_eq!(value, 42);
    }
}
