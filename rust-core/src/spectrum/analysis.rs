//! High-level spectrum analyzer
//!
//! Combines the DFT engine with optional log scaling to produce one display
//! frame per call. Renderers only ever see the flat magnitude buffer.

use crate::error::Result;
use crate::fourier::{log_scale_custom_in_place, Transform, TableCache, LOG_SCALE_DIVISOR};
use std::sync::Arc;

/// Amplitude scale applied to the magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Normalized linear magnitude
    Linear,

    /// `1 + ln(m) / divisor`, clamped to 0 below the threshold
    Log { divisor: f32 },
}

impl Scale {
    /// Log scale with the standard divisor
    pub fn log() -> Self {
        Scale::Log { divisor: LOG_SCALE_DIVISOR }
    }
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Requested transform length (powers of two use the FFT)
    pub spectrum_size: usize,

    /// Samples consumed per frame, zero-padded up to `spectrum_size`;
    /// a larger value grows the transform to fit
    pub samples_in: usize,

    /// Sample rate in Hz
    pub sample_rate: f32,

    /// Output amplitude scale
    pub scale: Scale,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            spectrum_size: 1024,
            samples_in: 1024,
            sample_rate: 44100.0,
            scale: Scale::Linear,
        }
    }
}

/// Real-time spectrum analyzer
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    cache: Arc<TableCache>,
    transform: Transform,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// # Arguments
    /// * `cache` - Table cache shared with other analyzers
    /// * `config` - Analyzer configuration
    pub fn new(cache: Arc<TableCache>, config: AnalyzerConfig) -> Result<Self> {
        let transform = Transform::new(&cache, config.spectrum_size, config.samples_in)?;

        Ok(Self {
            config,
            cache,
            transform,
        })
    }

    /// Analyze one frame and return its display spectrum
    ///
    /// # Returns
    /// `spectrum_size / 2` values, linear or log scaled per the config
    pub fn analyze(&mut self, signal: &[f32]) -> Result<Vec<f32>> {
        let mut spectrum = vec![0.0; self.num_bins()];
        self.analyze_into(&mut spectrum, signal)?;
        Ok(spectrum)
    }

    /// Analyze one frame into a caller-owned buffer
    pub fn analyze_into(&mut self, output: &mut [f32], signal: &[f32]) -> Result<()> {
        self.transform.perform(output, signal)?;

        if let Scale::Log { divisor } = self.config.scale {
            let bins = self.num_bins();
            log_scale_custom_in_place(&mut output[..bins], divisor)?;
        }

        Ok(())
    }

    /// Get bin center frequencies in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f32> {
        let bin_width = self.config.sample_rate / self.transform.spectrum_size() as f32;
        (0..self.num_bins())
            .map(|bin| bin as f32 * bin_width)
            .collect()
    }

    /// Get frequency bins in normalized units (0 to 1, where 1 = Nyquist)
    pub fn frequency_bins_normalized(&self) -> Vec<f32> {
        (0..self.num_bins())
            .map(|bin| 2.0 * bin as f32 / self.transform.spectrum_size() as f32)
            .collect()
    }

    /// Update configuration
    ///
    /// The transform is only rebuilt when its size or input length changes.
    pub fn update_config(&mut self, config: AnalyzerConfig) -> Result<()> {
        let needs_new_transform = config.spectrum_size != self.config.spectrum_size
            || config.samples_in != self.config.samples_in;

        if needs_new_transform {
            self.transform = Transform::new(&self.cache, config.spectrum_size, config.samples_in)?;
        }

        self.config = config;
        Ok(())
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Get the underlying transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.transform.num_bins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpectrumError;
    use crate::fourier::DftMethod;
    use std::f32::consts::PI;

    fn sine(freq_hz: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (2.0 * PI * freq_hz * n as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_analyzer_basic() {
        let config = AnalyzerConfig {
            spectrum_size: 1024,
            samples_in: 1024,
            sample_rate: 48000.0,
            scale: Scale::Linear,
        };

        let mut analyzer = SpectrumAnalyzer::new(Arc::new(TableCache::new()), config).unwrap();

        // 1.5 kHz lands exactly on bin 32
        let freq_hz = 1500.0;
        let spectrum = analyzer.analyze(&sine(freq_hz, 48000.0, 1024)).unwrap();

        assert_eq!(spectrum.len(), 512);

        let freqs = analyzer.frequency_bins_hz();
        let (peak_idx, &peak) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert!((freqs[peak_idx] - freq_hz).abs() < 1.0);
        assert!((peak - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_analyzer_log_scale() {
        let config = AnalyzerConfig {
            spectrum_size: 256,
            samples_in: 256,
            scale: Scale::log(),
            ..AnalyzerConfig::default()
        };
        let mut analyzer = SpectrumAnalyzer::new(Arc::new(TableCache::new()), config).unwrap();

        let spectrum = analyzer.analyze(&vec![1.0; 256]).unwrap();

        // DC of a unit constant is 1.0, which the log scale keeps at 1.0
        assert!((spectrum[0] - 1.0).abs() < 1e-5);
        assert!(spectrum[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_frequency_axes() {
        let config = AnalyzerConfig {
            spectrum_size: 8,
            samples_in: 8,
            sample_rate: 8000.0,
            scale: Scale::Linear,
        };
        let analyzer = SpectrumAnalyzer::new(Arc::new(TableCache::new()), config).unwrap();

        assert_eq!(analyzer.frequency_bins_hz(), vec![0.0, 1000.0, 2000.0, 3000.0]);
        assert_eq!(analyzer.frequency_bins_normalized(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_frequency_axes_follow_grown_transform() {
        let config = AnalyzerConfig {
            spectrum_size: 4,
            samples_in: 8,
            sample_rate: 8000.0,
            scale: Scale::Linear,
        };
        let analyzer = SpectrumAnalyzer::new(Arc::new(TableCache::new()), config).unwrap();

        assert_eq!(analyzer.num_bins(), 4);
        assert_eq!(analyzer.frequency_bins_hz(), vec![0.0, 1000.0, 2000.0, 3000.0]);
    }

    #[test]
    fn test_update_config_reuses_cache() {
        let cache = Arc::new(TableCache::new());
        let mut analyzer = SpectrumAnalyzer::new(cache.clone(), AnalyzerConfig::default()).unwrap();
        assert_eq!(analyzer.transform().method(), DftMethod::Fft);

        let mut config = analyzer.config().clone();
        config.spectrum_size = 600;
        config.samples_in = 600;
        analyzer.update_config(config).unwrap();

        assert_eq!(analyzer.num_bins(), 300);
        assert_eq!(analyzer.transform().method(), DftMethod::BruteForce);
        assert_eq!(cache.len(), 2);

        // Scale-only change keeps the transform and builds nothing
        let mut config = analyzer.config().clone();
        config.scale = Scale::log();
        analyzer.update_config(config).unwrap();
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalyzerConfig {
            spectrum_size: 1,
            samples_in: 1,
            ..AnalyzerConfig::default()
        };

        let err = SpectrumAnalyzer::new(Arc::new(TableCache::new()), config)
            .err()
            .unwrap();
        assert_eq!(err, SpectrumError::SpectrumTooSmall { size: 1 });
    }
}
