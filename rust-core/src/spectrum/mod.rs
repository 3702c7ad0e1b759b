//! Frame-level spectral analysis for visualization

pub mod analysis;

pub use analysis::{AnalyzerConfig, Scale, SpectrumAnalyzer};
