//! Per-answer stopwatch.

use std::{ops::Sub, time::Duration};

/// Measures the time spent on the current answer.
///
/// Generic over the instant type so tests can drive it with virtual time.
/// Reading the elapsed time never resets it.
#[derive(Debug, Clone, Copy)]
pub struct AnswerTimer<I> {
    started_at: I,
}

impl<I> AnswerTimer<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Start the timer at `now`.
    pub fn new(now: I) -> Self {
        Self { started_at: now }
    }

    /// Restart the timer at `now`.
    pub fn reset(&mut self, now: I) {
        self.started_at = now;
    }

    /// Time since the last reset. Zero if `now` precedes it.
    pub fn elapsed(&self, now: I) -> Duration {
        if now <= self.started_at { Duration::ZERO } else { now - self.started_at }
    }

    /// [`elapsed`](Self::elapsed) in whole milliseconds, saturating.
    pub fn elapsed_ms(&self, now: I) -> u64 {
        u64::try_from(self.elapsed(now).as_millis()).unwrap_or(u64::MAX)
    }

    /// Read the elapsed milliseconds, then reset at `now`.
    pub fn lap(&mut self, now: I) -> u64 {
        let elapsed = self.elapsed_ms(now);
        self.reset(now);
        elapsed
    }

    /// Instant of the last reset.
    pub fn started_at(&self) -> I {
        self.started_at
    }
}
