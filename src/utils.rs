//! utils — shared construction helpers for the CLI and the Python bindings.

use crate::model::{
    errors::CoverageResult,
    params::InstrumentParams,
    pipeline::CoverageModel,
    start_position::StartModelOptions,
};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{PyArrayMethods, PyReadonlyArray1};

/// Build a [`CoverageModel`] from flat instrument settings and the wrap count.
///
/// # Errors
/// Any validation error of [`InstrumentParams::new`] or
/// [`StartModelOptions::new`].
pub fn build_coverage_model(
    polymerase_rate: f64, acquisition_limit: f64, five_prime_utr: usize, three_prime_utr: usize,
    hairpin: usize, min_map_bases: usize, wraps: usize,
) -> CoverageResult<CoverageModel> {
    let instrument = InstrumentParams::new(
        polymerase_rate,
        acquisition_limit,
        five_prime_utr,
        three_prime_utr,
        hairpin,
        min_map_bases,
    )?;
    let start_options = StartModelOptions::new(wraps)?;
    Ok(CoverageModel::new(instrument, start_options))
}

/// Accept a 1-D float64 numpy array, a pandas Series, or any sequence of
/// floats and copy it into a `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro.as_array().to_vec());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro.as_array().to_vec());
        }
    }

    raw.extract::<Vec<f64>>().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })
}

/// Same as [`extract_f64_vec`] for non-negative integer axes.
#[cfg(feature = "python-bindings")]
pub fn extract_usize_vec<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Vec<usize>> {
    raw.extract::<Vec<usize>>().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err("expected a sequence of non-negative integers")
    })
}
