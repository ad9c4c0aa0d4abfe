//! Elapsed-time sources

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::traits::ElapsedClock;

/// Resolution of both simulated clocks
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Wall-clock timer counting microseconds since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedClock for MonotonicClock {
    #[inline]
    fn elapsed(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn ticks_per_second(&self) -> u64 {
        MICROS_PER_SECOND
    }
}

/// Microsecond clock that only moves when told to
///
/// Clones share the same counter, so a test can keep one handle and hand
/// the other to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ticks`
    pub fn advance(&self, ticks: u64) {
        self.now.fetch_add(ticks, Ordering::Relaxed);
    }

    /// Jump to an absolute time; never moves backwards
    pub fn set(&self, ticks: u64) {
        self.now.fetch_max(ticks, Ordering::Relaxed);
    }
}

impl ElapsedClock for ManualClock {
    #[inline]
    fn elapsed(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }

    fn ticks_per_second(&self) -> u64 {
        MICROS_PER_SECOND
    }
}
