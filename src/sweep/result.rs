//! sweep::result — the fraction table produced by a sweep.

use crate::{
    model::errors::{CoverageError, CoverageResult},
    sweep::axes::SweepAxes,
};
use ndarray::{Array2, Array3, ArrayView2, Axis};

/// Relative tolerance used when locating a float axis value.
const AXIS_MATCH_TOL: f64 = 1e-9;

/// One sweep cell as a flat record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepCell {
    pub transcript_len: usize,
    pub tau: f64,
    pub lag_time: f64,
    pub fraction: f64,
}

/// SweepResult — fractions indexed `[tau, transcript, lag]`.
///
/// Fields
/// ------
/// - `axes`: the axes the table was computed on.
/// - `fractions`: shape `(n_tau, n_transcript, n_lag)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    axes: SweepAxes,
    fractions: Array3<f64>,
}

impl SweepResult {
    /// Wrap a table computed on `axes`.
    ///
    /// # Errors
    /// [`CoverageError::LengthMismatch`] if the table has fewer or more
    /// entries than `axes` has cells.
    pub fn new(axes: SweepAxes, fractions: Array3<f64>) -> CoverageResult<Self> {
        if fractions.dim() != axes.shape() {
            return Err(CoverageError::LengthMismatch {
                expected: axes.n_cells(),
                actual: fractions.len(),
            });
        }
        Ok(SweepResult { axes, fractions })
    }

    pub fn axes(&self) -> &SweepAxes {
        &self.axes
    }

    pub fn fractions(&self) -> &Array3<f64> {
        &self.fractions
    }

    pub fn into_fractions(self) -> Array3<f64> {
        self.fractions
    }

    /// Fraction at index `(transcript_idx, tau_idx, lag_idx)`.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn fraction(&self, transcript_idx: usize, tau_idx: usize, lag_idx: usize) -> f64 {
        self.fractions[[tau_idx, transcript_idx, lag_idx]]
    }

    /// Fraction at the given axis values.
    ///
    /// # Errors
    /// [`CoverageError::AxisValueNotFound`] if a value is not on its axis.
    pub fn lookup(&self, transcript_len: usize, tau: f64, lag_time: f64) -> CoverageResult<f64> {
        let j = self
            .axes
            .transcript_lens()
            .iter()
            .position(|&l| l == transcript_len)
            .ok_or(CoverageError::AxisValueNotFound {
                axis: "transcript_len",
                value: transcript_len as f64,
            })?;
        let i = find_float(self.axes.taus(), tau, "tau")?;
        let k = find_float(self.axes.lag_times(), lag_time, "lag_time")?;
        Ok(self.fractions[[i, j, k]])
    }

    /// The `[tau, transcript]` table for lag index `lag_idx`.
    ///
    /// # Panics
    /// Panics if `lag_idx` is out of range.
    pub fn lag_slice(&self, lag_idx: usize) -> ArrayView2<'_, f64> {
        self.fractions.index_axis(Axis(2), lag_idx)
    }

    /// Owned copy of [`Self::lag_slice`].
    pub fn lag_table(&self, lag_idx: usize) -> Array2<f64> {
        self.lag_slice(lag_idx).to_owned()
    }

    /// Every cell in row-major `[tau, transcript, lag]` order.
    pub fn cells(&self) -> impl Iterator<Item = SweepCell> + '_ {
        self.axes.indices().map(move |(i, j, k)| SweepCell {
            transcript_len: self.axes.transcript_lens()[j],
            tau: self.axes.taus()[i],
            lag_time: self.axes.lag_times()[k],
            fraction: self.fractions[[i, j, k]],
        })
    }
}

fn find_float(values: &[f64], target: f64, axis: &'static str) -> CoverageResult<usize> {
    values
        .iter()
        .position(|&v| (v - target).abs() <= AXIS_MATCH_TOL * v.abs().max(1.0))
        .ok_or(CoverageError::AxisValueNotFound { axis, value: target })
}
