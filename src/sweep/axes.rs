//! sweep::axes — the three parameter axes of a coverage sweep.
//!
//! A sweep is the cartesian product transcript length × tau × lag time.
//! [`SweepAxes`] validates each axis once so every cell built from it is a
//! valid [`CellParams`].

use crate::model::{
    errors::{CoverageError, CoverageResult},
    params::CellParams,
};

/// Transcript lengths, read-length taus and lag times to sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAxes {
    transcript_lens: Vec<usize>,
    taus: Vec<f64>,
    lag_times: Vec<f64>,
}

impl SweepAxes {
    /// Build validated axes.
    ///
    /// # Errors
    /// - [`CoverageError::EmptyAxis`] if any axis is empty.
    /// - [`CoverageError::InvalidAxisValue`] for a tau that is not finite and
    ///   > 0 or a lag time that is not finite and >= 0.
    pub fn new(
        transcript_lens: Vec<usize>, taus: Vec<f64>, lag_times: Vec<f64>,
    ) -> CoverageResult<Self> {
        if transcript_lens.is_empty() {
            return Err(CoverageError::EmptyAxis { axis: "transcript_len" });
        }
        if taus.is_empty() {
            return Err(CoverageError::EmptyAxis { axis: "tau" });
        }
        if lag_times.is_empty() {
            return Err(CoverageError::EmptyAxis { axis: "lag_time" });
        }
        if let Some(&value) = taus.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(CoverageError::InvalidAxisValue { axis: "tau", value });
        }
        if let Some(&value) = lag_times.iter().find(|l| !l.is_finite() || **l < 0.0) {
            return Err(CoverageError::InvalidAxisValue { axis: "lag_time", value });
        }
        Ok(SweepAxes { transcript_lens, taus, lag_times })
    }

    /// The published study grid: transcripts 500..5000 step 250,
    /// taus 1000..10000 step 1000, lags 10 s, 1, 5, 10 and 15 min.
    pub fn reference() -> Self {
        SweepAxes {
            transcript_lens: (500..5000).step_by(250).collect(),
            taus: (1..10).map(|k| 1000.0 * k as f64).collect(),
            lag_times: vec![10.0, 60.0, 5.0 * 60.0, 10.0 * 60.0, 15.0 * 60.0],
        }
    }

    pub fn transcript_lens(&self) -> &[usize] {
        &self.transcript_lens
    }

    pub fn taus(&self) -> &[f64] {
        &self.taus
    }

    pub fn lag_times(&self) -> &[f64] {
        &self.lag_times
    }

    /// `(n_tau, n_transcript, n_lag)`, the layout of the result table.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.taus.len(), self.transcript_lens.len(), self.lag_times.len())
    }

    pub fn n_cells(&self) -> usize {
        self.taus.len() * self.transcript_lens.len() * self.lag_times.len()
    }

    /// Cell at table index `[tau_idx, transcript_idx, lag_idx]`.
    ///
    /// # Errors
    /// The validation errors of [`CellParams::new`]; axis values are checked
    /// at construction, so these do not occur for axes built with
    /// [`SweepAxes::new`].
    ///
    /// # Panics
    /// Panics if an index is out of range (slice indexing).
    pub fn cell(
        &self, tau_idx: usize, transcript_idx: usize, lag_idx: usize,
    ) -> CoverageResult<CellParams> {
        CellParams::new(
            self.transcript_lens[transcript_idx],
            self.taus[tau_idx],
            self.lag_times[lag_idx],
        )
    }

    /// Every `[tau, transcript, lag]` index triple in row-major table order.
    pub fn indices(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (m, n, k) = self.shape();
        (0..m).flat_map(move |i| (0..n).flat_map(move |j| (0..k).map(move |l| (i, j, l))))
    }
}
