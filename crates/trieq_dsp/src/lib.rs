//! TriEQ DSP - Digital Signal Processing Module
//!
//! This crate provides the signal path of the three-band equalizer:
//! - Second-order low pass, high pass and band pass filters (BiQuad)
//! - A filter bank that runs all three and blends them by mode flags
//! - The affine control scaler used to map knob readings to cutoffs
//!
//! # Architecture
//!
//! The per-sample path follows a strict "no allocation, no lock, no log"
//! rule. Coefficients are recomputed only from the control path, between
//! two per-sample calls.

mod bank;
mod error;
mod filter;
mod scale;

pub use bank::{BandOutputs, FilterBank};
pub use error::DspError;
pub use filter::{BandPass, Filter, HighPass, LowPass, MAX_GAIN, MIN_CUTOFF_HZ, NYQUIST_MARGIN};
pub use scale::{checked_scale, scale};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Verify all public types are accessible
        let lp = LowPass::new(50.0, 48000.0, 1.0).unwrap();
        let hp = HighPass::new(150.0, 48000.0, 1.0).unwrap();
        let bp = BandPass::new(50.0, 150.0, 48000.0, 1.0).unwrap();
        let _bank = FilterBank::new(lp, hp, bp);
        assert_eq!(scale(0.5, 0.0, 1.0, 20.0, 300.0), 160.0);
    }
}
