//! Parameter Updater
//!
//! Reads the five front-panel knobs and pushes fresh gains and cutoffs
//! into the filter bank. Runs on the sample loop's thread, between two
//! samples, at a small fraction of the sample rate.

use tracing::debug;
use trieq_dsp::{Filter, FilterBank};
use trieq_platform::AnalogIn;

use crate::config::FrequencyRange;
use crate::error::EngineResult;

/// The five normalized control inputs
#[derive(Debug, Clone)]
pub struct ControlInputs<K> {
    pub low_cutoff: K,
    pub high_cutoff: K,
    pub low_gain: K,
    pub mid_gain: K,
    pub high_gain: K,
}

/// Knob readings from one control update, with cutoffs already mapped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlReadings {
    pub low_cutoff_hz: f32,
    pub high_cutoff_hz: f32,
    pub low_gain: f32,
    pub mid_gain: f32,
    pub high_gain: f32,
}

pub struct ParameterUpdater<K> {
    inputs: ControlInputs<K>,
    low_range: FrequencyRange,
    high_range: FrequencyRange,
}

impl<K: AnalogIn> ParameterUpdater<K> {
    /// Create an updater; fails on a degenerate or non-finite cutoff range
    pub fn new(
        inputs: ControlInputs<K>,
        low_range: FrequencyRange,
        high_range: FrequencyRange,
    ) -> EngineResult<Self> {
        low_range.validate("low_cutoff_range")?;
        high_range.validate("high_cutoff_range")?;

        Ok(Self {
            inputs,
            low_range,
            high_range,
        })
    }

    /// Read every knob once
    ///
    /// Cutoffs are truncated to whole hertz.
    pub fn read(&mut self) -> ControlReadings {
        debug_assert!(self.low_range.min < self.low_range.max);
        debug_assert!(self.high_range.min < self.high_range.max);

        ControlReadings {
            low_cutoff_hz: self.low_range.map(self.inputs.low_cutoff.read()).trunc(),
            high_cutoff_hz: self.high_range.map(self.inputs.high_cutoff.read()).trunc(),
            low_gain: self.inputs.low_gain.read(),
            mid_gain: self.inputs.mid_gain.read(),
            high_gain: self.inputs.high_gain.read(),
        }
    }

    /// Refresh gains then cutoffs of all three filters from the knobs
    ///
    /// The low knob pair drives the low pass, the high pair the high pass,
    /// and the band pass spans from the low cutoff to the high cutoff with
    /// the mid gain.
    pub fn update_controls(&mut self, bank: &mut FilterBank) {
        let readings = self.read();

        bank.low_pass_mut().set_gain(readings.low_gain);
        bank.high_pass_mut().set_gain(readings.high_gain);
        bank.band_pass_mut().set_gain(readings.mid_gain);
        bank.low_pass_mut().set_cutoff(readings.low_cutoff_hz);
        bank.high_pass_mut().set_cutoff(readings.high_cutoff_hz);
        bank.band_pass_mut()
            .set_cutoff(readings.low_cutoff_hz, readings.high_cutoff_hz);

        debug!(
            "Controls: low gain {:.2}, mid gain {:.2}, high gain {:.2}, cutoffs {} / {} Hz",
            readings.low_gain,
            readings.mid_gain,
            readings.high_gain,
            readings.low_cutoff_hz,
            readings.high_cutoff_hz
        );
    }

    pub fn inputs(&self) -> &ControlInputs<K> {
        &self.inputs
    }
}
