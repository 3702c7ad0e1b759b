//! Python bindings for log scaling and cache control

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::fourier::{log_scale_custom, LOG_SCALE_DIVISOR};
use super::shared_cache;

/// Map linear magnitudes to the log display scale
///
/// Args:
///     magnitudes: Linear magnitudes as float32 numpy array
///     divisor: Contrast divisor (default: -ln(0.001))
#[pyfunction]
#[pyo3(signature = (magnitudes, divisor=LOG_SCALE_DIVISOR))]
pub fn log_scale<'py>(
    py: Python<'py>,
    magnitudes: PyReadonlyArray1<f32>,
    divisor: f32,
) -> PyResult<&'py PyArray1<f32>> {
    let input = magnitudes
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut output = vec![0.0; input.len()];
    log_scale_custom(&mut output, input, divisor)?;

    Ok(PyArray1::from_vec(py, output))
}

/// Build DFT tables for the given sizes before frames start flowing
#[pyfunction]
pub fn prewarm(sizes: Vec<usize>) -> PyResult<()> {
    shared_cache().prewarm(&sizes)?;
    Ok(())
}
