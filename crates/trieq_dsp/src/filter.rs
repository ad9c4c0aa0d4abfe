//! Low Pass, High Pass and Band Pass Filters
//!
//! Each filter is built from second-order sections designed with the
//! RBJ (Robert Bristow-Johnson) Audio EQ Cookbook formulas, run as
//! Direct Form II Transposed biquads.
//!
//! # Parameter Boundaries
//!
//! Cutoffs are clamped to `[MIN_CUTOFF_HZ, NYQUIST_MARGIN * sample_rate]`
//! before any coefficient is computed, so an out-of-range control reading
//! can never feed NaN or an unstable pole pair into the audio path.
//! Gains are clamped to `[0.0, MAX_GAIN]`.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, ToHertz, Type};
use tracing::{debug, warn};

use crate::error::DspError;

/// Lowest cutoff any section will be tuned to (Hz)
pub const MIN_CUTOFF_HZ: f32 = 10.0;

/// Highest cutoff as a fraction of the sample rate (0.5 would be Nyquist)
pub const NYQUIST_MARGIN: f32 = 0.45;

/// Upper bound of the linear output gain
pub const MAX_GAIN: f32 = 1.0;

/// Per-sample interface shared by the three filter kinds
///
/// # Real-time Safety Contract
///
/// `update()` MUST run in constant time with no allocation, no locking
/// and no logging. It is called once per sample period.
pub trait Filter: Send {
    /// Advance the filter by one sample and return the gain-scaled output
    fn update(&mut self, input: f32) -> f32;

    /// Set the linear output gain (clamped to `[0.0, MAX_GAIN]`)
    fn set_gain(&mut self, gain: f32);

    /// Currently applied gain
    fn gain(&self) -> f32;

    /// Clear the history buffer
    fn reset(&mut self);

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Response {
    LowPass,
    HighPass,
}

/// Clamp a requested cutoff into the safe sub-Nyquist interval
#[inline]
fn clamp_cutoff(cutoff: f32, sample_rate: f32) -> f32 {
    if cutoff.is_nan() {
        return MIN_CUTOFF_HZ;
    }
    cutoff.clamp(MIN_CUTOFF_HZ, sample_rate * NYQUIST_MARGIN)
}

#[inline]
fn clamp_gain(gain: f32) -> f32 {
    if gain.is_nan() {
        return 0.0;
    }
    gain.clamp(0.0, MAX_GAIN)
}

fn validate(sample_rate: f32, q: f32) -> Result<(), DspError> {
    // The clamp interval must be non-empty
    if !sample_rate.is_finite() || sample_rate * NYQUIST_MARGIN <= MIN_CUTOFF_HZ {
        return Err(DspError::InvalidSampleRate(sample_rate));
    }
    if !q.is_finite() || q <= 0.0 {
        return Err(DspError::InvalidQ(q));
    }
    Ok(())
}

fn design(
    response: Response,
    cutoff: f32,
    sample_rate: f32,
    q: f32,
) -> Result<Coefficients<f32>, DspError> {
    let filter = match response {
        Response::LowPass => Type::LowPass,
        Response::HighPass => Type::HighPass,
    };

    Coefficients::<f32>::from_params(filter, sample_rate.hz(), cutoff.hz(), q).map_err(|_| {
        DspError::InvalidCoefficients {
            frequency: cutoff,
            sample_rate,
        }
    })
}

/// One biquad section plus the parameters its coefficients came from
struct Section {
    response: Response,
    sample_rate: f32,
    q: f32,
    cutoff: f32,
    biquad: DirectForm2Transposed<f32>,
}

impl Section {
    fn new(response: Response, cutoff: f32, sample_rate: f32, q: f32) -> Result<Self, DspError> {
        validate(sample_rate, q)?;
        let cutoff = clamp_cutoff(cutoff, sample_rate);
        let coeffs = design(response, cutoff, sample_rate, q)?;

        Ok(Self {
            response,
            sample_rate,
            q,
            cutoff,
            biquad: DirectForm2Transposed::<f32>::new(coeffs),
        })
    }

    /// Swap in coefficients for a new cutoff, keeping the delay line
    fn retune(&mut self, cutoff: f32) {
        let clamped = clamp_cutoff(cutoff, self.sample_rate);
        if clamped != cutoff {
            debug!(
                "Cutoff {}Hz clamped to {}Hz (sample rate {}Hz)",
                cutoff, clamped, self.sample_rate
            );
        }

        match design(self.response, clamped, self.sample_rate, self.q) {
            Ok(coeffs) => {
                self.biquad.update_coefficients(coeffs);
                self.cutoff = clamped;
            }
            Err(e) => warn!("Keeping previous coefficients: {}", e),
        }
    }

    #[inline]
    fn run(&mut self, input: f32) -> f32 {
        self.biquad.run(input)
    }

    fn reset(&mut self) {
        self.biquad.reset_state();
    }
}

/// Second-order low pass filter with output gain
pub struct LowPass {
    section: Section,
    gain: f32,
}

impl LowPass {
    /// Create a low pass at `cutoff` Hz, unity gain
    ///
    /// Fails if the sample rate leaves no room below Nyquist or Q is not positive.
    pub fn new(cutoff: f32, sample_rate: f32, q: f32) -> Result<Self, DspError> {
        Ok(Self {
            section: Section::new(Response::LowPass, cutoff, sample_rate, q)?,
            gain: MAX_GAIN,
        })
    }

    /// Recompute coefficients for a new cutoff
    ///
    /// Safe to call between any two `update()` calls.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.section.retune(cutoff);
    }

    /// Cutoff currently applied (after clamping)
    pub fn cutoff(&self) -> f32 {
        self.section.cutoff
    }

    pub fn sample_rate(&self) -> f32 {
        self.section.sample_rate
    }

    pub fn q(&self) -> f32 {
        self.section.q
    }
}

impl Filter for LowPass {
    #[inline]
    fn update(&mut self, input: f32) -> f32 {
        self.section.run(input) * self.gain
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = clamp_gain(gain);
    }

    fn gain(&self) -> f32 {
        self.gain
    }

    fn reset(&mut self) {
        self.section.reset();
    }

    fn name(&self) -> &'static str {
        "Low Pass"
    }
}

/// Second-order high pass filter with output gain
pub struct HighPass {
    section: Section,
    gain: f32,
}

impl HighPass {
    /// Create a high pass at `cutoff` Hz, unity gain
    pub fn new(cutoff: f32, sample_rate: f32, q: f32) -> Result<Self, DspError> {
        Ok(Self {
            section: Section::new(Response::HighPass, cutoff, sample_rate, q)?,
            gain: MAX_GAIN,
        })
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.section.retune(cutoff);
    }

    pub fn cutoff(&self) -> f32 {
        self.section.cutoff
    }

    pub fn sample_rate(&self) -> f32 {
        self.section.sample_rate
    }

    pub fn q(&self) -> f32 {
        self.section.q
    }
}

impl Filter for HighPass {
    #[inline]
    fn update(&mut self, input: f32) -> f32 {
        self.section.run(input) * self.gain
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = clamp_gain(gain);
    }

    fn gain(&self) -> f32 {
        self.gain
    }

    fn reset(&mut self) {
        self.section.reset();
    }

    fn name(&self) -> &'static str {
        "High Pass"
    }
}

/// Band pass built as a high pass at the lower edge cascaded into a
/// low pass at the upper edge
pub struct BandPass {
    lower: Section,
    upper: Section,
    gain: f32,
}

/// Edges in ascending order
#[inline]
fn ordered(low: f32, high: f32) -> (f32, f32) {
    if high < low {
        (high, low)
    } else {
        (low, high)
    }
}

impl BandPass {
    /// Create a band pass passing `low..high` Hz, unity gain
    pub fn new(low: f32, high: f32, sample_rate: f32, q: f32) -> Result<Self, DspError> {
        let (low, high) = ordered(low, high);
        Ok(Self {
            lower: Section::new(Response::HighPass, low, sample_rate, q)?,
            upper: Section::new(Response::LowPass, high, sample_rate, q)?,
            gain: MAX_GAIN,
        })
    }

    /// Retune both edges; edges given in the wrong order are swapped
    pub fn set_cutoff(&mut self, low: f32, high: f32) {
        let (low, high) = ordered(low, high);
        self.lower.retune(low);
        self.upper.retune(high);
    }

    /// Applied (lower, upper) edges after clamping
    pub fn cutoffs(&self) -> (f32, f32) {
        (self.lower.cutoff, self.upper.cutoff)
    }

    pub fn sample_rate(&self) -> f32 {
        self.lower.sample_rate
    }

    pub fn q(&self) -> f32 {
        self.lower.q
    }
}

impl Filter for BandPass {
    #[inline]
    fn update(&mut self, input: f32) -> f32 {
        let edge = self.lower.run(input);
        self.upper.run(edge) * self.gain
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = clamp_gain(gain);
    }

    fn gain(&self) -> f32 {
        self.gain
    }

    fn reset(&mut self) {
        self.lower.reset();
        self.upper.reset();
    }

    fn name(&self) -> &'static str {
        "Band Pass"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f32 = 50000.0;

    /// Feed a constant and return the last output
    fn settle<F: Filter>(filter: &mut F, level: f32, samples: usize) -> f32 {
        let mut out = 0.0;
        for _ in 0..samples {
            out = filter.update(level);
        }
        out
    }

    fn sine_peak<F: Filter>(filter: &mut F, freq: f32, samples: usize) -> f32 {
        let mut peak = 0.0_f32;
        for i in 0..samples {
            let t = i as f32 / FS;
            let out = filter.update((2.0 * std::f32::consts::PI * freq * t).sin());
            // Skip the start-up transient
            if i > samples / 2 {
                peak = peak.max(out.abs());
            }
        }
        peak
    }

    #[test]
    fn test_lowpass_dc_converges_to_gain() {
        let mut lp = LowPass::new(1000.0, 48000.0, 1.0).unwrap();
        lp.set_gain(0.5);

        let out = settle(&mut lp, 0.8, 48000);
        assert!((out - 0.4).abs() < 1e-3, "Expected ~0.4, got {}", out);
        assert!(out.abs() <= 0.4 * 1.001, "Output exceeded gain * input: {}", out);
    }

    #[test]
    fn test_lowpass_low_cutoff_stays_bounded() {
        let mut lp = LowPass::new(50.0, FS, 1.0).unwrap();
        let out = settle(&mut lp, 0.8, 200_000);
        assert!(out.is_finite());
        assert!((out - 0.8).abs() < 0.05, "Expected ~0.8, got {}", out);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut hp = HighPass::new(150.0, FS, 1.0).unwrap();
        let out = settle(&mut hp, 0.8, 100_000);
        assert!(out.abs() < 1e-3, "High pass should reject DC: {}", out);
    }

    #[test]
    fn test_bandpass_blocks_dc() {
        let mut bp = BandPass::new(50.0, 150.0, FS, 1.0).unwrap();
        let out = settle(&mut bp, 0.8, 200_000);
        assert!(out.abs() < 1e-3, "Band pass should reject DC: {}", out);
    }

    #[test]
    fn test_lowpass_attenuates_treble() {
        let mut lp = LowPass::new(300.0, FS, 1.0).unwrap();
        let peak = sine_peak(&mut lp, 10000.0, 10000);
        assert!(peak < 0.01, "10kHz should be attenuated: {}", peak);
    }

    #[test]
    fn test_highpass_passes_treble() {
        let mut hp = HighPass::new(2000.0, FS, 1.0).unwrap();
        let peak = sine_peak(&mut hp, 9973.0, 10000);
        assert!(peak > 0.9 && peak < 1.1, "10kHz should pass: {}", peak);
    }

    #[test]
    fn test_bandpass_passes_centre() {
        let mut bp = BandPass::new(500.0, 5000.0, FS, 0.707).unwrap();
        let centre = sine_peak(&mut bp, 1600.0, 20000);
        let outside = sine_peak(&mut bp, 20000.0, 20000);
        assert!(centre > 0.8, "Centre should pass: {}", centre);
        assert!(outside < centre * 0.5, "Far band should be cut: {}", outside);
    }

    #[test]
    fn test_cutoff_clamped_below_nyquist() {
        let mut lp = LowPass::new(50.0, FS, 1.0).unwrap();

        lp.set_cutoff(1.0e6);
        assert_eq!(lp.cutoff(), FS * NYQUIST_MARGIN);

        lp.set_cutoff(-5.0);
        assert_eq!(lp.cutoff(), MIN_CUTOFF_HZ);

        lp.set_cutoff(f32::NAN);
        assert_eq!(lp.cutoff(), MIN_CUTOFF_HZ);

        lp.set_cutoff(f32::INFINITY);
        assert_eq!(lp.cutoff(), FS * NYQUIST_MARGIN);

        for _ in 0..1000 {
            assert!(lp.update(0.5).is_finite());
        }
    }

    #[test]
    fn test_constructor_clamps_cutoff() {
        let hp = HighPass::new(40000.0, FS, 1.0).unwrap();
        assert_eq!(hp.cutoff(), FS * NYQUIST_MARGIN);
    }

    #[test]
    fn test_gain_clamping() {
        let mut hp = HighPass::new(150.0, FS, 1.0).unwrap();

        hp.set_gain(5.0);
        assert_eq!(hp.gain(), MAX_GAIN);

        hp.set_gain(-1.0);
        assert_eq!(hp.gain(), 0.0);

        hp.set_gain(f32::NAN);
        assert_eq!(hp.gain(), 0.0);

        hp.set_gain(0.3);
        assert_eq!(hp.gain(), 0.3);
    }

    #[test]
    fn test_zero_gain_silences_output() {
        let mut bp = BandPass::new(50.0, 150.0, FS, 1.0).unwrap();
        bp.set_gain(0.0);
        for i in 0..1000 {
            assert_eq!(bp.update((i as f32 * 0.01).sin()), 0.0);
        }
    }

    #[test]
    fn test_bandpass_orders_edges() {
        let mut bp = BandPass::new(150.0, 50.0, FS, 1.0).unwrap();
        assert_eq!(bp.cutoffs(), (50.0, 150.0));

        bp.set_cutoff(9000.0, 2000.0);
        assert_eq!(bp.cutoffs(), (2000.0, 9000.0));
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert_eq!(
            LowPass::new(50.0, 0.0, 1.0).err(),
            Some(DspError::InvalidSampleRate(0.0))
        );
        assert!(HighPass::new(50.0, -48000.0, 1.0).is_err());
        assert!(BandPass::new(50.0, 150.0, f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_invalid_q() {
        assert_eq!(
            LowPass::new(50.0, FS, 0.0).err(),
            Some(DspError::InvalidQ(0.0))
        );
        assert!(HighPass::new(50.0, FS, -1.0).is_err());
    }

    #[test]
    fn test_sample_rate_and_q_stored() {
        let bp = BandPass::new(50.0, 150.0, 47619.0, 0.9).unwrap();
        assert_eq!(bp.sample_rate(), 47619.0);
        assert_eq!(bp.q(), 0.9);
    }

    #[test]
    fn test_hot_swap_stays_bounded() {
        let mut lp = LowPass::new(20.0, FS, 1.0).unwrap();
        let mut peak = 0.0_f32;

        for i in 0..20000 {
            if i % 500 == 0 {
                let cutoff = if (i / 500) % 2 == 0 { 20.0 } else { 300.0 };
                lp.set_cutoff(cutoff);
            }
            let x = (2.0 * std::f32::consts::PI * 100.0 * i as f32 / FS).sin();
            let out = lp.update(x);
            assert!(out.is_finite());
            peak = peak.max(out.abs());
        }

        assert!(peak < 4.0, "Swapping coefficients blew up: {}", peak);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut lp = LowPass::new(1000.0, FS, 1.0).unwrap();
        settle(&mut lp, 0.8, 1000);

        lp.reset();
        assert_eq!(lp.update(0.0), 0.0);
    }

    #[test]
    fn test_filter_names() {
        let lp = LowPass::new(50.0, FS, 1.0).unwrap();
        let hp = HighPass::new(150.0, FS, 1.0).unwrap();
        let bp = BandPass::new(50.0, 150.0, FS, 1.0).unwrap();
        assert_eq!(lp.name(), "Low Pass");
        assert_eq!(hp.name(), "High Pass");
        assert_eq!(bp.name(), "Band Pass");
    }
}
