//! Control Scaling
//!
//! Maps a normalized control reading onto a physical parameter range.

use crate::error::DspError;

/// Affine remap of `input` from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// Values outside the input range are extrapolated, not clamped.
/// `in_min == in_max` divides by zero; use [`checked_scale`] where the
/// bounds are not known to differ.
#[inline]
pub fn scale(input: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let in_percent = (input - in_min) / (in_max - in_min);
    in_percent * (out_max - out_min) + out_min
}

/// [`scale`] with the equal-bounds precondition checked
pub fn checked_scale(
    input: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
) -> Result<f32, DspError> {
    if in_min == in_max {
        return Err(DspError::DegenerateRange { min: in_min });
    }
    Ok(scale(input, in_min, in_max, out_min, out_max))
}
