//! Test tone source and output level meter

use std::f32::consts::TAU;

/// Sine generator biased into the unipolar converter range
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    phase: f32,
    increment: f32,
    amplitude: f32,
    bias: f32,
}

impl ToneGenerator {
    pub fn new(frequency: f32, sample_rate: f32, amplitude: f32, bias: f32) -> Self {
        Self {
            phase: 0.0,
            increment: frequency / sample_rate,
            amplitude,
            bias,
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.bias + self.amplitude * (TAU * self.phase).sin();
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }
}

/// Peak deviation from the bias point over fixed windows
#[derive(Debug, Clone)]
pub struct PeakMeter {
    bias: f32,
    window: u32,
    count: u32,
    peak: f32,
}

impl PeakMeter {
    pub fn new(bias: f32, window: u32) -> Self {
        Self {
            bias,
            window: window.max(1),
            count: 0,
            peak: 0.0,
        }
    }

    /// Feed one output sample; returns the window's peak when it completes
    pub fn push(&mut self, sample: f32) -> Option<f32> {
        self.peak = self.peak.max((sample - self.bias).abs());
        self.count += 1;
        if self.count < self.window {
            return None;
        }

        let peak = self.peak;
        self.count = 0;
        self.peak = 0.0;
        Some(peak)
    }
}

/// Convert linear amplitude to dB, floored at -120 dB
pub fn to_db(level: f32) -> f32 {
    if level <= 1e-6 {
        -120.0
    } else {
        20.0 * level.log10()
    }
}
