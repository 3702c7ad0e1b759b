//! Post-processing of raw DFT output for display
//!
//! Magnitude normalization and logarithmic amplitude scaling

use crate::error::{Result, SpectrumError};

/// Magnitudes at or below this level map to 0 on the log scale
pub const LOG_SCALE_THRESHOLD: f32 = 0.001;

/// Default log scale divisor, equal to -ln(LOG_SCALE_THRESHOLD)
pub const LOG_SCALE_DIVISOR: f32 = 6.908;

/// Write `scale * sqrt(re² + im²)` for each bin into `output`
///
/// Processes `output.len()` bins; `real` and `imag` must be at least that long.
pub fn complex_to_norm_scale(output: &mut [f32], real: &[f32], imag: &[f32], scale: f32) {
    for ((out, &re), &im) in output.iter_mut().zip(real).zip(imag) {
        *out = (re * re + im * im).sqrt() * scale;
    }
}

/// Log-scale magnitudes with the default divisor
///
/// # Arguments
/// * `output` - Destination, at least `input.len()` long
/// * `input` - Linear magnitudes
pub fn log_scale(output: &mut [f32], input: &[f32]) -> Result<()> {
    log_scale_custom(output, input, LOG_SCALE_DIVISOR)
}

/// Log-scale magnitudes with a custom contrast divisor
///
/// `output[i] = 1 + ln(input[i]) / divisor` above [`LOG_SCALE_THRESHOLD`],
/// 0 otherwise. Smaller divisors give more contrast.
pub fn log_scale_custom(output: &mut [f32], input: &[f32], divisor: f32) -> Result<()> {
    check_divisor(divisor)?;

    if output.len() < input.len() {
        return Err(SpectrumError::OutputTooShort {
            needed: input.len(),
            actual: output.len(),
        });
    }

    for (out, &value) in output.iter_mut().zip(input) {
        *out = log_scale_value(value, divisor);
    }

    Ok(())
}

/// In-place [`log_scale`]
pub fn log_scale_in_place(buffer: &mut [f32]) -> Result<()> {
    log_scale_custom_in_place(buffer, LOG_SCALE_DIVISOR)
}

/// In-place [`log_scale_custom`]
pub fn log_scale_custom_in_place(buffer: &mut [f32], divisor: f32) -> Result<()> {
    check_divisor(divisor)?;

    for value in buffer.iter_mut() {
        *value = log_scale_value(*value, divisor);
    }

    Ok(())
}

#[inline]
fn log_scale_value(value: f32, divisor: f32) -> f32 {
    if value > LOG_SCALE_THRESHOLD {
        1.0 + value.ln() / divisor
    } else {
        0.0
    }
}

fn check_divisor(divisor: f32) -> Result<()> {
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(SpectrumError::InvalidDivisor(divisor));
    }
    Ok(())
}
