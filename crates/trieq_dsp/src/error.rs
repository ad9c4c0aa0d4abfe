//! DSP Error Types

use thiserror::Error;

/// Errors that can occur while building or configuring filters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Sample rate {0}Hz is too low to place a cutoff below Nyquist")]
    InvalidSampleRate(f32),

    #[error("Q must be finite and positive, got {0}")]
    InvalidQ(f32),

    #[error("Invalid filter coefficients for frequency {frequency}Hz at sample rate {sample_rate}Hz")]
    InvalidCoefficients { frequency: f32, sample_rate: f32 },

    #[error("Degenerate scaling range: min and max are both {min}")]
    DegenerateRange { min: f32 },
}
