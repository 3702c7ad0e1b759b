//! Fourier Scope - Magnitude Spectrum Engine
//! 
//! Real-time magnitude spectra for audio visualization, with shared DFT
//! tables, an FFT fast path and optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod fourier;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectrumError};
pub use fourier::{log_scale, log_scale_custom, DftMethod, TableCache, Transform};
pub use spectrum::SpectrumAnalyzer;
