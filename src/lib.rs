//! utr_coverage — full-UTR coverage probabilities for circular SMRT templates.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the coverage model to Python via the `_utr_coverage` extension module when
//! the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`model` and `sweep`) as the public crate
//!   surface, plus `cli` for the `utr-coverage` binary.
//! - Define the `#[pyclass]` wrappers and the `#[pymodule]` initializer for
//!   the `_utr_coverage` Python extension.
//! - Register the `model` submodule under `utr_coverage` so that dotted
//!   imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Python-visible types mirror the invariants of their Rust counterparts
//!   ([`model::CoverageModel`], [`model::CoverageOutcome`]).
//!
//! Conventions
//! -----------
//! - Arrays cross the boundary as freshly allocated numpy arrays.
//! - [`model::CoverageError`] values become `ValueError` at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration test in `tests/`.

pub mod cli;
pub mod model;
pub mod sweep;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray3};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    model::{
        CellParams, CoverageModel as RustCoverageModel, CoverageOutcome,
        params::{
            DEFAULT_ACQUISITION_LIMIT, DEFAULT_FIVE_PRIME_UTR, DEFAULT_HAIRPIN,
            DEFAULT_MIN_MAP_BASES, DEFAULT_POLYMERASE_RATE, DEFAULT_THREE_PRIME_UTR,
        },
        start_position::DEFAULT_WRAPS,
    },
    sweep::{SweepAxes, SweepOptions, run_sweep},
    utils::{build_coverage_model, extract_f64_vec, extract_usize_vec},
};

/// CoverageModel — Python-facing wrapper for [`model::CoverageModel`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `CoverageModel(rate=2.2, acquisition_limit=3000.0, five_prime_utr=130,
/// three_prime_utr=250, hairpin=44, min_map_bases=80, wraps=3)`.
///
/// Fields
/// ------
/// - `inner`: the validated Rust model; immutable after construction.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "utr_coverage.model", name = "CoverageModel")]
pub struct PyCoverageModel {
    inner: RustCoverageModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyCoverageModel {
    #[new]
    #[pyo3(
        signature = (
            rate = DEFAULT_POLYMERASE_RATE,
            acquisition_limit = DEFAULT_ACQUISITION_LIMIT,
            five_prime_utr = DEFAULT_FIVE_PRIME_UTR,
            three_prime_utr = DEFAULT_THREE_PRIME_UTR,
            hairpin = DEFAULT_HAIRPIN,
            min_map_bases = DEFAULT_MIN_MAP_BASES,
            wraps = DEFAULT_WRAPS,
        ),
        text_signature = "(rate=2.2, acquisition_limit=3000.0, five_prime_utr=130, \
                          three_prime_utr=250, hairpin=44, min_map_bases=80, wraps=3)"
    )]
    pub fn new(
        rate: f64, acquisition_limit: f64, five_prime_utr: usize, three_prime_utr: usize,
        hairpin: usize, min_map_bases: usize, wraps: usize,
    ) -> PyResult<Self> {
        let inner = build_coverage_model(
            rate,
            acquisition_limit,
            five_prime_utr,
            three_prime_utr,
            hairpin,
            min_map_bases,
            wraps,
        )?;
        Ok(PyCoverageModel { inner })
    }

    /// Probability that both UTRs of one transcript are read.
    #[pyo3(signature = (transcript_len, tau, lag_time))]
    pub fn fraction(&self, transcript_len: usize, tau: f64, lag_time: f64) -> PyResult<f64> {
        let cell = CellParams::new(transcript_len, tau, lag_time)?;
        Ok(self.inner.fraction(&cell)?)
    }

    /// Full evaluation with every intermediate array.
    #[pyo3(signature = (transcript_len, tau, lag_time))]
    pub fn evaluate(
        &self, py: Python<'_>, transcript_len: usize, tau: f64, lag_time: f64,
    ) -> PyResult<CoverageEvaluation> {
        let cell = CellParams::new(transcript_len, tau, lag_time)?;
        let model = self.inner;
        let outcome = py.allow_threads(move || model.evaluate(&cell))?;
        Ok(CoverageEvaluation { inner: outcome })
    }

    /// `(hotstart, non_hotstart)` fractions for one transcript and tau.
    #[pyo3(signature = (transcript_len, tau))]
    pub fn compare_hotstart(&self, transcript_len: usize, tau: f64) -> PyResult<(f64, f64)> {
        let cmp = self.inner.compare_hotstart(transcript_len, tau)?;
        Ok((cmp.hotstart, cmp.non_hotstart))
    }

    /// Fractions over the cartesian product of the three axes, as a numpy
    /// array of shape `(len(taus), len(transcript_lens), len(lag_times))`.
    #[pyo3(signature = (transcript_lens, taus, lag_times, threads = 0))]
    pub fn sweep<'py>(
        &self, py: Python<'py>, transcript_lens: &Bound<'py, PyAny>, taus: &Bound<'py, PyAny>,
        lag_times: &Bound<'py, PyAny>, threads: usize,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let axes = SweepAxes::new(
            extract_usize_vec(transcript_lens)?,
            extract_f64_vec(taus)?,
            extract_f64_vec(lag_times)?,
        )?;
        let model = self.inner;
        let options = SweepOptions::new(threads, true);
        let result = py.allow_threads(move || run_sweep(&model, &axes, &options))?;
        Ok(result.into_fractions().into_pyarray(py))
    }

    /// Template half-cycle length for a transcript.
    pub fn half_cycle(&self, transcript_len: usize) -> PyResult<usize> {
        Ok(self.inner.geometry(transcript_len)?.half_cycle)
    }
}

/// CoverageEvaluation — one evaluated cell with its intermediate arrays.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "utr_coverage.model")]
pub struct CoverageEvaluation {
    inner: CoverageOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CoverageEvaluation {
    #[getter]
    pub fn fraction(&self) -> f64 {
        self.inner.fraction
    }

    #[getter]
    pub fn half_cycle(&self) -> usize {
        self.inner.geometry.half_cycle
    }

    #[getter]
    pub fn max_required_bases(&self) -> usize {
        self.inner.geometry.max_required_bases
    }

    /// Position-grid offsets, aligned with `start_mass` and `required_bases`.
    #[getter]
    pub fn positions<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.grid.values().into_pyarray(py)
    }

    #[getter]
    pub fn start_mass<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.start_mass.clone().into_pyarray(py)
    }

    #[getter]
    pub fn required_bases<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<usize>> {
        self.inner.required_bases.clone().into_pyarray(py)
    }

    /// Case number 1..=4 per grid position.
    #[getter]
    pub fn cases(&self) -> Vec<u8> {
        self.inner.cases.iter().map(|c| c.code()).collect()
    }

    #[getter]
    pub fn histogram<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.histogram.clone().into_pyarray(py)
    }

    #[getter]
    pub fn survival<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.survival.clone().into_pyarray(py)
    }
}

/// _utr_coverage — PyO3 module initializer for the Python extension.
///
/// Creates the `model` submodule, attaches it to `_utr_coverage` and registers
/// it in `sys.modules` as `utr_coverage.model`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _utr_coverage<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let model_mod = PyModule::new(_py, "model")?;
    model_module(_py, m, &model_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("utr_coverage.model", model_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn model_module<'py>(
    _py: Python, utr_coverage: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyCoverageModel>()?;
    m.add_class::<CoverageEvaluation>()?;
    utr_coverage.add_submodule(m)?;
    Ok(())
}
