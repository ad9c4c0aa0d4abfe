//! Three-Filter Bank
//!
//! Runs one input sample through the low, high and band filters and
//! blends their outputs according to the two mode flags.

use crate::filter::{BandPass, Filter, HighPass, LowPass};

/// Per-filter outputs for one sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandOutputs {
    pub low: f32,
    pub high: f32,
    pub band: f32,
}

impl BandOutputs {
    /// Mix the three contributions
    ///
    /// `high * high_mode + low * low_mode + band`, with each mode acting as
    /// a 0/1 multiplier. The band pass is always summed in.
    #[inline]
    pub fn blend(&self, low_mode: bool, high_mode: bool) -> f32 {
        let low_flag = if low_mode { 1.0 } else { 0.0 };
        let high_flag = if high_mode { 1.0 } else { 0.0 };
        self.high * high_flag + self.low * low_flag + self.band
    }
}

/// The low, high and band filters sharing one input
///
/// All three filters advance every sample, whether or not their output is
/// gated into the mix, so re-enabling a band never replays stale history.
pub struct FilterBank {
    low_pass: LowPass,
    high_pass: HighPass,
    band_pass: BandPass,
}

impl FilterBank {
    pub fn new(low_pass: LowPass, high_pass: HighPass, band_pass: BandPass) -> Self {
        Self {
            low_pass,
            high_pass,
            band_pass,
        }
    }

    /// Advance all three filters by one sample
    ///
    /// # Real-time Safety
    /// No allocations, no locks, O(1).
    #[inline]
    pub fn process(&mut self, input: f32) -> BandOutputs {
        BandOutputs {
            high: self.high_pass.update(input),
            low: self.low_pass.update(input),
            band: self.band_pass.update(input),
        }
    }

    pub fn low_pass(&self) -> &LowPass {
        &self.low_pass
    }

    pub fn high_pass(&self) -> &HighPass {
        &self.high_pass
    }

    pub fn band_pass(&self) -> &BandPass {
        &self.band_pass
    }

    pub fn low_pass_mut(&mut self) -> &mut LowPass {
        &mut self.low_pass
    }

    pub fn high_pass_mut(&mut self) -> &mut HighPass {
        &mut self.high_pass
    }

    pub fn band_pass_mut(&mut self) -> &mut BandPass {
        &mut self.band_pass
    }

    /// Clear the history of all three filters
    pub fn reset(&mut self) {
        self.low_pass.reset();
        self.high_pass.reset();
        self.band_pass.reset();
    }
}
