//! Error types for the spectrum engine
//!
//! Every failure here is an invalid argument caught before any computation runs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("Spectrum size must be at least 2 (got {size})")]
    SpectrumTooSmall { size: usize },

    #[error("Sample count must be at least 1 (got {samples_in} for spectrum size {spectrum_size})")]
    InvalidSampleCount { samples_in: usize, spectrum_size: usize },

    #[error("Output buffer too short: need {needed} values, got {actual}")]
    OutputTooShort { needed: usize, actual: usize },

    #[error("Input buffer too short: need {needed} samples, got {actual}")]
    InputTooShort { needed: usize, actual: usize },

    #[error("Log scale divisor must be finite and non-zero (got {0})")]
    InvalidDivisor(f32),
}

impl SpectrumError {
    /// All variants are argument errors; kept as a query so callers
    /// matching on the category don't depend on the variant list.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SpectrumError::SpectrumTooSmall { .. }
                | SpectrumError::InvalidSampleCount { .. }
                | SpectrumError::OutputTooShort { .. }
                | SpectrumError::InputTooShort { .. }
                | SpectrumError::InvalidDivisor(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SpectrumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SpectrumError::SpectrumTooSmall { size: 1 };
        assert_eq!(err.to_string(), "Spectrum size must be at least 2 (got 1)");

        let err = SpectrumError::OutputTooShort { needed: 4, actual: 2 };
        assert!(err.to_string().contains("need 4"));
    }

    #[test]
    fn test_all_variants_are_invalid_argument() {
        let errors = [
            SpectrumError::SpectrumTooSmall { size: 0 },
            SpectrumError::InvalidSampleCount { samples_in: 0, spectrum_size: 8 },
            SpectrumError::OutputTooShort { needed: 4, actual: 0 },
            SpectrumError::InputTooShort { needed: 8, actual: 0 },
            SpectrumError::InvalidDivisor(0.0),
        ];

        assert!(errors.iter().all(|e| e.is_invalid_argument()));
    }
}
