//! Simulated potentiometer

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::traits::AnalogIn;

/// A normalized control reading that another thread can turn
///
/// Rust pattern: AtomicF32 doesn't exist, so the value is stored as f32 bits.
#[derive(Debug, Clone)]
pub struct SimKnob {
    bits: Arc<AtomicU32>,
}

impl SimKnob {
    pub fn new(value: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(clamp_unit(value).to_bits())),
        }
    }

    /// Turn the knob; values outside `[0.0, 1.0]` are clamped, NaN reads as 0
    pub fn set(&self, value: f32) {
        self.bits
            .store(clamp_unit(value).to_bits(), Ordering::Relaxed);
    }

    pub fn value(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for SimKnob {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnalogIn for SimKnob {
    #[inline]
    fn read(&mut self) -> f32 {
        self.value()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
