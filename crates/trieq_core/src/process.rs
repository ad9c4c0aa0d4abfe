//! Per-sample Process Step
//!
//! # Real-time Safety
//!
//! `process()` runs once per sample period and never allocates, locks
//! or logs. The mode flags are read with two relaxed loads.

use std::sync::Arc;

use trieq_dsp::FilterBank;

use crate::modes::ModeFlags;

/// Offset removal, three-filter bank and mode-gated mix
pub struct EqProcessor {
    bank: FilterBank,
    flags: Arc<ModeFlags>,
    dc_offset: f32,
}

impl EqProcessor {
    pub fn new(bank: FilterBank, flags: Arc<ModeFlags>, dc_offset: f32) -> Self {
        Self {
            bank,
            flags,
            dc_offset,
        }
    }

    /// Filter one raw converter reading into one raw converter output
    #[inline]
    pub fn process(&mut self, raw: f32) -> f32 {
        let outputs = self.bank.process(raw - self.dc_offset);
        let modes = self.flags.snapshot();
        outputs.blend(modes.low, modes.high) + self.dc_offset
    }

    pub fn bank(&self) -> &FilterBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut FilterBank {
        &mut self.bank
    }

    pub fn dc_offset(&self) -> f32 {
        self.dc_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::modes::{ModeController, ModeSwitch};
    use trieq_platform::sim::SimSwitch;

    const FS: f32 = 50000.0;

    fn test_signal(n: usize) -> f32 {
        let t = n as f32 / FS;
        0.3 + 0.2 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
            + 0.05 * (2.0 * std::f32::consts::PI * 5000.0 * t).sin()
    }

    #[test]
    fn test_matches_reference_mix() {
        let config = EngineConfig::default();
        let offset = config.dc_offset;

        for (low, high) in [(false, false), (true, false), (false, true), (true, true)] {
            let modes = ModeController::new();
            let low_switch = SimSwitch::new("low", low);
            let high_switch = SimSwitch::new("high", high);
            modes.attach(ModeSwitch::Low, &low_switch).unwrap();
            modes.attach(ModeSwitch::High, &high_switch).unwrap();

            let mut processor =
                EqProcessor::new(config.build_filter_bank(FS).unwrap(), modes.flags(), offset);
            let mut reference = config.build_filter_bank(FS).unwrap();

            for n in 0..2000 {
                let x = test_signal(n);
                let expected = reference.process(x - offset).blend(low, high) + offset;
                assert_eq!(processor.process(x), expected);
            }
        }
    }

    #[test]
    fn test_silence_returns_offset() {
        // An input sitting at the bias point is zero after offset removal
        let config = EngineConfig::default();
        let modes = ModeController::new();
        modes.handler(ModeSwitch::Low, trieq_platform::Edge::Rising).on_edge();
        modes.handler(ModeSwitch::High, trieq_platform::Edge::Rising).on_edge();
        let mut processor = EqProcessor::new(
            config.build_filter_bank(FS).unwrap(),
            modes.flags(),
            config.dc_offset,
        );

        for _ in 0..1000 {
            let y = processor.process(config.dc_offset);
            assert!((y - config.dc_offset).abs() < 1e-6);
        }
    }

    #[test]
    fn test_edge_applies_on_next_sample() {
        let config = EngineConfig::default();
        let offset = config.dc_offset;
        let modes = ModeController::new();
        let high_switch = SimSwitch::new("high", false);
        modes.attach(ModeSwitch::High, &high_switch).unwrap();

        let mut processor =
            EqProcessor::new(config.build_filter_bank(FS).unwrap(), modes.flags(), offset);
        let mut reference = config.build_filter_bank(FS).unwrap();

        for n in 0..500 {
            let x = test_signal(n);
            let expected = reference.process(x - offset).blend(false, false) + offset;
            assert_eq!(processor.process(x), expected);
        }

        high_switch.set_level(true);

        let x = test_signal(500);
        let outputs = reference.process(x - offset);
        assert_ne!(outputs.high, 0.0);
        assert_eq!(processor.process(x), outputs.blend(false, true) + offset);
    }

    #[test]
    fn test_gated_filters_keep_running() {
        // A filter muted by its flag still advances, so re-enabling it
        // resumes from live history
        let config = EngineConfig::default();
        let offset = config.dc_offset;
        let modes = ModeController::new();
        let low_switch = SimSwitch::new("low", false);
        modes.attach(ModeSwitch::Low, &low_switch).unwrap();

        let mut processor =
            EqProcessor::new(config.build_filter_bank(FS).unwrap(), modes.flags(), offset);
        let mut reference = config.build_filter_bank(FS).unwrap();

        for n in 0..1000 {
            let x = test_signal(n);
            reference.process(x - offset);
            processor.process(x);
        }

        low_switch.set_level(true);
        let x = test_signal(1000);
        let expected = reference.process(x - offset).blend(true, false) + offset;
        assert_eq!(processor.process(x), expected);
    }
}
