//! Sample Timing
//!
//! The sample period is a whole number of clock ticks, so the achieved
//! rate is generally not the target rate. Filters must be designed at the
//! achieved rate or every cutoff ends up off by the same ratio.

use crate::error::{EngineError, EngineResult};

/// Sample period and the rates derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTiming {
    target_rate: f32,
    ticks_per_second: u64,
    period_ticks: u64,
    actual_rate: f32,
    indicator_ticks: u32,
}

impl SampleTiming {
    /// Derive timing for `target_rate` Hz on a clock with the given resolution
    ///
    /// The period is truncated to whole ticks, as an integer hardware timer
    /// would, so the achieved rate is never below the target.
    pub fn new(target_rate: f32, ticks_per_second: u64) -> EngineResult<Self> {
        if !target_rate.is_finite() || target_rate <= 0.0 {
            return Err(EngineError::ConfigError(format!(
                "Invalid target sample rate: {}",
                target_rate
            )));
        }

        let period_ticks = (ticks_per_second as f64 / target_rate as f64).floor() as u64;
        if period_ticks == 0 {
            return Err(EngineError::SamplePeriodTooShort {
                target_rate,
                ticks_per_second,
            });
        }

        let actual_rate = (ticks_per_second as f64 / period_ticks as f64) as f32;
        let indicator_ticks = (actual_rate.round() as u32).max(1);

        Ok(Self {
            target_rate,
            ticks_per_second,
            period_ticks,
            actual_rate,
            indicator_ticks,
        })
    }

    pub fn target_rate(&self) -> f32 {
        self.target_rate
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    /// Clock ticks per sample
    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    /// Rate actually achieved with the truncated period
    pub fn actual_rate(&self) -> f32 {
        self.actual_rate
    }

    /// Samples between indicator toggles (one second at the actual rate)
    pub fn indicator_ticks(&self) -> u32 {
        self.indicator_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_48k_on_microsecond_clock() {
        let timing = SampleTiming::new(48000.0, 1_000_000).unwrap();
        // 1e6 / 48000 = 20.83us, truncated to 20us
        assert_eq!(timing.period_ticks(), 20);
        assert_eq!(timing.actual_rate(), 50000.0);
        assert_eq!(timing.indicator_ticks(), 50000);
        assert_eq!(timing.target_rate(), 48000.0);
    }

    #[test]
    fn test_44k1_rounds_indicator() {
        let timing = SampleTiming::new(44100.0, 1_000_000).unwrap();
        assert_eq!(timing.period_ticks(), 22);
        assert!((timing.actual_rate() - 45454.545).abs() < 0.01);
        assert_eq!(timing.indicator_ticks(), 45455);
    }

    #[test]
    fn test_exact_division() {
        let timing = SampleTiming::new(1000.0, 1_000_000).unwrap();
        assert_eq!(timing.period_ticks(), 1000);
        assert_eq!(timing.actual_rate(), 1000.0);
        assert_eq!(timing.indicator_ticks(), 1000);
    }

    #[test]
    fn test_period_too_short() {
        assert!(matches!(
            SampleTiming::new(2.0e6, 1_000_000),
            Err(EngineError::SamplePeriodTooShort { .. })
        ));
    }

    #[test]
    fn test_invalid_target() {
        assert!(SampleTiming::new(0.0, 1_000_000).is_err());
        assert!(SampleTiming::new(f32::NAN, 1_000_000).is_err());
    }
}
