//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::sync::{Arc, OnceLock};
use crate::error::SpectrumError;
use crate::fourier::TableCache;

mod scale_bindings;
mod spectrum_bindings;
mod transform_bindings;

/// Table cache shared by every transform created from Python
static PYTHON_TABLE_CACHE: OnceLock<Arc<TableCache>> = OnceLock::new();

fn shared_cache() -> Arc<TableCache> {
    Arc::clone(PYTHON_TABLE_CACHE.get_or_init(|| Arc::new(TableCache::new())))
}

impl From<SpectrumError> for PyErr {
    fn from(err: SpectrumError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn fourier_scope(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<transform_bindings::PyTransform>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    m.add_function(wrap_pyfunction!(scale_bindings::log_scale, m)?)?;
    m.add_function(wrap_pyfunction!(scale_bindings::prewarm, m)?)?;

    m.add("LOG_SCALE_DIVISOR", crate::fourier::LOG_SCALE_DIVISOR)?;
    m.add("LOG_SCALE_THRESHOLD", crate::fourier::LOG_SCALE_THRESHOLD)?;

    Ok(())
}
