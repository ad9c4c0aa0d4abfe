//! Engine Configuration
//!
//! Every tunable of the equalizer loop lives here: rates, offsets, knob
//! ranges, control refresh divisor and the initial filter settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use trieq_dsp::{scale, BandPass, Filter, FilterBank, HighPass, LowPass};

use crate::error::{EngineError, EngineResult};

/// Cutoff range a knob sweeps across (Hz)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub min: f32,
    pub max: f32,
}

impl FrequencyRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a normalized `[0, 1]` reading onto this range
    #[inline]
    pub fn map(&self, normalized: f32) -> f32 {
        scale(normalized, 0.0, 1.0, self.min, self.max)
    }

    pub(crate) fn validate(&self, name: &str) -> EngineResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(EngineError::ConfigError(format!(
                "{} must be finite, got {}..{}",
                name, self.min, self.max
            )));
        }
        if self.min <= 0.0 || self.min >= self.max {
            return Err(EngineError::ConfigError(format!(
                "{} must satisfy 0 < min < max, got {}..{}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Initial settings for a single-cutoff filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub cutoff_hz: f32,
    pub q: f32,
    pub gain: f32,
}

/// Initial settings for the band pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSettings {
    pub low_hz: f32,
    pub high_hz: f32,
    pub q: f32,
    pub gain: f32,
}

/// Overall engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ideal sample rate in Hz; the achieved rate depends on clock resolution
    pub target_sample_rate: f32,

    /// Bias of the unipolar converters, removed before filtering and restored after
    pub dc_offset: f32,

    /// Range swept by the low cutoff knob
    pub low_cutoff_range: FrequencyRange,

    /// Range swept by the high cutoff knob
    pub high_cutoff_range: FrequencyRange,

    /// Sample periods between control refreshes
    pub control_update_divisor: u32,

    pub low_pass: FilterSettings,
    pub high_pass: FilterSettings,
    pub band_pass: BandSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 48000.0,
            // 1V bias on a 3.3V converter
            dc_offset: 1.0 / 3.3,
            low_cutoff_range: FrequencyRange::new(20.0, 300.0),
            high_cutoff_range: FrequencyRange::new(2000.0, 10000.0),
            control_update_divisor: 10000,
            low_pass: FilterSettings {
                cutoff_hz: 50.0,
                q: 1.0,
                gain: 1.0,
            },
            high_pass: FilterSettings {
                cutoff_hz: 150.0,
                q: 1.0,
                gain: 1.0,
            },
            band_pass: BandSettings {
                low_hz: 50.0,
                high_hz: 150.0,
                q: 1.0,
                gain: 1.0,
            },
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> EngineResult<()> {
        if !self.target_sample_rate.is_finite() || self.target_sample_rate <= 0.0 {
            return Err(EngineError::ConfigError(format!(
                "Invalid target sample rate: {}",
                self.target_sample_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.dc_offset) {
            return Err(EngineError::ConfigError(format!(
                "DC offset must lie in [0, 1], got {}",
                self.dc_offset
            )));
        }
        if self.control_update_divisor == 0 {
            return Err(EngineError::ConfigError(
                "Control update divisor must be at least 1".into(),
            ));
        }
        self.low_cutoff_range.validate("low_cutoff_range")?;
        self.high_cutoff_range.validate("high_cutoff_range")?;

        let gains = [self.low_pass.gain, self.high_pass.gain, self.band_pass.gain];
        if gains.iter().any(|g| !g.is_finite()) {
            return Err(EngineError::ConfigError(format!(
                "Filter gains must be finite, got {:?}",
                gains
            )));
        }
        Ok(())
    }

    /// Build the three filters at the achieved sample rate
    pub fn build_filter_bank(&self, actual_rate: f32) -> EngineResult<FilterBank> {
        let mut low_pass = LowPass::new(self.low_pass.cutoff_hz, actual_rate, self.low_pass.q)?;
        low_pass.set_gain(self.low_pass.gain);

        let mut high_pass =
            HighPass::new(self.high_pass.cutoff_hz, actual_rate, self.high_pass.q)?;
        high_pass.set_gain(self.high_pass.gain);

        let mut band_pass = BandPass::new(
            self.band_pass.low_hz,
            self.band_pass.high_hz,
            actual_rate,
            self.band_pass.q,
        )?;
        band_pass.set_gain(self.band_pass.gain);

        Ok(FilterBank::new(low_pass, high_pass, band_pass))
    }
}
