//! Python bindings for spectrum analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::spectrum::{AnalyzerConfig, Scale, SpectrumAnalyzer};
use super::shared_cache;

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

fn scale_from_args(log_scale: bool, divisor: f32) -> Scale {
    if log_scale {
        Scale::Log { divisor }
    } else {
        Scale::Linear
    }
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     spectrum_size: Transform length (powers of two use the FFT)
    ///     samples_in: Samples per frame (defaults to spectrum_size)
    ///     sample_rate: Sample rate in Hz
    ///     log_scale: Whether to log-scale the output
    ///     divisor: Log scale contrast divisor
    #[new]
    #[pyo3(signature = (spectrum_size=1024, samples_in=None, sample_rate=44100.0, log_scale=false, divisor=crate::fourier::LOG_SCALE_DIVISOR))]
    fn new(
        spectrum_size: usize,
        samples_in: Option<usize>,
        sample_rate: f32,
        log_scale: bool,
        divisor: f32,
    ) -> PyResult<Self> {
        let config = AnalyzerConfig {
            spectrum_size,
            samples_in: samples_in.unwrap_or(spectrum_size),
            sample_rate,
            scale: scale_from_args(log_scale, divisor),
        };

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(shared_cache(), config)?,
        })
    }

    /// Analyze one frame and return its display spectrum
    ///
    /// Args:
    ///     signal: Input signal as float32 numpy array
    ///
    /// Returns:
    ///     Spectrum as numpy array
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f32>,
    ) -> PyResult<&'py PyArray1<f32>> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let spectrum = self.analyzer.analyze(sig)?;

        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Get frequency bins in Hz
    fn frequency_bins_hz<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f32>> {
        Ok(PyArray1::from_vec(py, self.analyzer.frequency_bins_hz()))
    }

    /// Get frequency bins in normalized units (0 to 1, where 1 = Nyquist)
    fn frequency_bins_normalized<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f32>> {
        Ok(PyArray1::from_vec(py, self.analyzer.frequency_bins_normalized()))
    }

    /// Get number of frequency bins
    fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }

    /// Update configuration
    ///
    /// Args:
    ///     spectrum_size: New transform length
    ///     samples_in: New samples per frame
    ///     sample_rate: New sample rate
    ///     log_scale: Whether to log-scale the output
    ///     divisor: New log scale divisor
    #[pyo3(signature = (spectrum_size=None, samples_in=None, sample_rate=None, log_scale=None, divisor=None))]
    fn update_config(
        &mut self,
        spectrum_size: Option<usize>,
        samples_in: Option<usize>,
        sample_rate: Option<f32>,
        log_scale: Option<bool>,
        divisor: Option<f32>,
    ) -> PyResult<()> {
        let mut config = self.analyzer.config().clone();

        if let Some(size) = spectrum_size {
            config.spectrum_size = size;
            config.samples_in = samples_in.unwrap_or(size);
        } else if let Some(n) = samples_in {
            config.samples_in = n;
        }
        if let Some(sr) = sample_rate {
            config.sample_rate = sr;
        }

        let (was_log, old_divisor) = match config.scale {
            Scale::Linear => (false, crate::fourier::LOG_SCALE_DIVISOR),
            Scale::Log { divisor } => (true, divisor),
        };
        config.scale = scale_from_args(
            log_scale.unwrap_or(was_log),
            divisor.unwrap_or(old_divisor),
        );

        self.analyzer.update_config(config)?;
        Ok(())
    }

    /// Get current sample rate
    fn get_sample_rate(&self) -> f32 {
        self.analyzer.config().sample_rate
    }

    /// Get current spectrum size
    fn get_spectrum_size(&self) -> usize {
        self.analyzer.config().spectrum_size
    }
}
