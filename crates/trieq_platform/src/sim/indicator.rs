//! Simulated status LED

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::trace;

use crate::traits::Indicator;

#[derive(Debug, Default)]
struct IndicatorState {
    on: AtomicBool,
    toggles: AtomicU64,
}

/// LED stand-in that remembers its level and counts changes
#[derive(Debug, Clone, Default)]
pub struct SimIndicator {
    state: Arc<IndicatorState>,
}

impl SimIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.state.on.load(Ordering::Relaxed)
    }

    /// Number of level changes since construction
    pub fn toggles(&self) -> u64 {
        self.state.toggles.load(Ordering::Relaxed)
    }
}

impl Indicator for SimIndicator {
    fn set(&mut self, on: bool) {
        if self.state.on.swap(on, Ordering::Relaxed) != on {
            self.state.toggles.fetch_add(1, Ordering::Relaxed);
            trace!("Indicator {}", if on { "on" } else { "off" });
        }
    }
}
