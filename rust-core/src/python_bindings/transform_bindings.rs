//! Python bindings for the DFT engine

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::fourier::{DftMethod, Transform};
use super::shared_cache;

/// Fixed-size magnitude transform exposed to Python
#[pyclass(name = "Transform")]
pub struct PyTransform {
    transform: Transform,
}

#[pymethods]
impl PyTransform {
    /// Create a new transform
    ///
    /// Args:
    ///     spectrum_size: Transform length (at least 2)
    ///     samples_in: Samples read per call (defaults to spectrum_size)
    #[new]
    #[pyo3(signature = (spectrum_size, samples_in=None))]
    fn new(spectrum_size: usize, samples_in: Option<usize>) -> PyResult<Self> {
        let cache = shared_cache();
        let transform = Transform::new(&cache, spectrum_size, samples_in.unwrap_or(spectrum_size))?;

        Ok(Self { transform })
    }

    /// Compute the normalized magnitude spectrum
    ///
    /// Args:
    ///     signal: Input samples as float32 numpy array
    ///
    /// Returns:
    ///     spectrum_size / 2 magnitudes as numpy array
    fn perform<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f32>,
    ) -> PyResult<&'py PyArray1<f32>> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let mut spectrum = vec![0.0; self.transform.num_bins()];
        self.transform.perform(&mut spectrum, sig)?;

        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Get the algorithm name ("fft-radix2-dit" or "brute-force")
    fn method(&self) -> &'static str {
        self.transform.method().name()
    }

    /// Whether the fast path is in use
    fn is_fft(&self) -> bool {
        self.transform.method() == DftMethod::Fft
    }

    fn spectrum_size(&self) -> usize {
        self.transform.spectrum_size()
    }

    fn num_bins(&self) -> usize {
        self.transform.num_bins()
    }

    fn __repr__(&self) -> String {
        format!(
            "Transform(spectrum_size={}, samples_in={}, method='{}')",
            self.transform.spectrum_size(),
            self.transform.samples_in(),
            self.transform.method().name()
        )
    }
}
