//! model::pipeline — one coverage-fraction evaluation, end to end.
//!
//! Purpose
//! -------
//! Compose the model stages for a single sweep cell: template geometry,
//! start-position mixture, required-bases map, bases-to-go histogram,
//! read-length survival, and the final weighted sum.
//!
//! Key behaviors
//! -------------
//! - [`CoverageModel::evaluate`] returns a [`CoverageOutcome`] holding the
//!   scalar fraction together with every intermediate array, so reporting
//!   layers can render them without recomputation.
//! - [`CoverageModel::fraction`] returns only the scalar.
//! - [`CoverageModel::compare_hotstart`] evaluates one cell under both lag
//!   presets.
//!
//! Invariants & assumptions
//! ------------------------
//! - All arrays are recomputed per call; the model holds only immutable
//!   parameters and is `Send + Sync`, so one instance can serve a parallel
//!   sweep.
//! - `start_mass`, `required_bases` and `cases` share the position grid's
//!   length; `histogram` and `survival` share the histogram length
//!   `geometry.max_required_bases + 1`.
//! - The fraction lies in `[0, 1]`: the histogram sums to 1 and the
//!   survival complement lies in `[0, 1]`.
//!
//! Conventions
//! -----------
//! - The default position grid is `0..2h`, one full template cycle.
//! - Logging goes through the `log` facade at `debug`/`trace` level only.

use crate::model::{
    errors::CoverageResult,
    fraction::covered_fraction,
    geometry::{PositionGrid, TemplateGeometry},
    histogram::bases_to_go_histogram,
    params::{CellParams, InstrumentParams, LagPreset},
    read_length::ReadLengthModel,
    requirement::{CoverageCase, required_bases},
    start_position::{StartModelOptions, start_position_mass},
};
use log::{debug, trace};
use ndarray::Array1;

/// CoverageModel — immutable model configuration shared across cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverageModel {
    instrument: InstrumentParams,
    start_options: StartModelOptions,
}

/// CoverageOutcome — result of one cell evaluation with its intermediates.
///
/// Fields
/// ------
/// - `cell`: the evaluated coordinates.
/// - `geometry`: half/full cycle lengths and the required-bases bound.
/// - `grid`: position grid of the first three arrays.
/// - `start_mass`: start-position mass (sums to 1).
/// - `required_bases`: bases still needed per start offset.
/// - `cases`: geometric case per start offset.
/// - `histogram`: bases-to-go mass, indexed by required bases.
/// - `survival`: probability of reading at least `i` bases, same length as
///   `histogram`.
/// - `fraction`: probability that both UTRs are covered.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageOutcome {
    pub cell: CellParams,
    pub geometry: TemplateGeometry,
    pub grid: PositionGrid,
    pub start_mass: Array1<f64>,
    pub required_bases: Array1<usize>,
    pub cases: Vec<CoverageCase>,
    pub histogram: Array1<f64>,
    pub survival: Array1<f64>,
    pub fraction: f64,
}

/// Fractions for the same cell under the hotstart and non-hotstart presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotstartComparison {
    pub transcript_len: usize,
    pub tau: f64,
    pub hotstart: f64,
    pub non_hotstart: f64,
}

impl HotstartComparison {
    /// Coverage gained by starting acquisition early.
    pub fn gain(&self) -> f64 {
        self.hotstart - self.non_hotstart
    }
}

impl CoverageModel {
    pub fn new(instrument: InstrumentParams, start_options: StartModelOptions) -> Self {
        CoverageModel { instrument, start_options }
    }

    pub fn instrument(&self) -> &InstrumentParams {
        &self.instrument
    }

    pub fn start_options(&self) -> &StartModelOptions {
        &self.start_options
    }

    /// Template geometry for a transcript length under this instrument.
    ///
    /// # Errors
    /// [`CoverageError::TemplateTooLong`](crate::model::errors::CoverageError::TemplateTooLong)
    /// if the template overflows base-count arithmetic.
    pub fn geometry(&self, transcript_len: usize) -> CoverageResult<TemplateGeometry> {
        TemplateGeometry::new(&self.instrument, transcript_len)
    }

    /// Evaluate one cell on the default grid `0..2h`.
    ///
    /// # Errors
    /// Any [`CoverageError`](crate::model::errors::CoverageError) raised by the
    /// stages: grid coverage, degenerate normalization, out-of-range
    /// histogram index, or invalid distribution parameters.
    pub fn evaluate(&self, cell: &CellParams) -> CoverageResult<CoverageOutcome> {
        let geometry = self.geometry(cell.transcript_len())?;
        let grid = PositionGrid::for_geometry(&geometry)?;
        self.evaluate_on_grid(cell, &grid)
    }

    /// Evaluate one cell on a caller-supplied position grid.
    ///
    /// # Errors
    /// [`CoverageError::GridTooShort`](crate::model::errors::CoverageError::GridTooShort)
    /// if `grid` does not cover `[0, 2h)`, plus the errors of [`Self::evaluate`].
    pub fn evaluate_on_grid(
        &self, cell: &CellParams, grid: &PositionGrid,
    ) -> CoverageResult<CoverageOutcome> {
        let geometry = self.geometry(cell.transcript_len())?;
        grid.check_covers(&geometry)?;
        trace!(
            "geometry: L={} h={} max_required={}",
            geometry.transcript_len, geometry.half_cycle, geometry.max_required_bases
        );

        let start_mass = start_position_mass(
            grid,
            &geometry,
            cell.lag_time(),
            self.instrument.polymerase_rate(),
            &self.start_options,
        )?;
        let required = required_bases(grid, &self.instrument, &geometry)?;
        let histogram =
            bases_to_go_histogram(&start_mass, &required.bases, geometry.histogram_len())?;
        let survival =
            ReadLengthModel::new(cell.tau(), &self.instrument)?.survival(histogram.len())?;
        let fraction = covered_fraction(&histogram, &survival)?;

        debug!(
            "cell L={} tau={} lag={}s -> fraction {:.6}",
            cell.transcript_len(),
            cell.tau(),
            cell.lag_time(),
            fraction
        );

        Ok(CoverageOutcome {
            cell: *cell,
            geometry,
            grid: *grid,
            start_mass,
            required_bases: required.bases,
            cases: required.cases,
            histogram,
            survival,
            fraction,
        })
    }

    /// Fraction of transcripts with both UTRs covered for one cell.
    ///
    /// # Errors
    /// Same as [`Self::evaluate`].
    pub fn fraction(&self, cell: &CellParams) -> CoverageResult<f64> {
        Ok(self.evaluate(cell)?.fraction)
    }

    /// Fractions for `(transcript_len, tau)` under both lag presets.
    ///
    /// # Errors
    /// Same as [`Self::evaluate`], plus `InvalidTau`.
    pub fn compare_hotstart(
        &self, transcript_len: usize, tau: f64,
    ) -> CoverageResult<HotstartComparison> {
        let hot = CellParams::with_preset(transcript_len, tau, LagPreset::Hotstart)?;
        let cold = CellParams::with_preset(transcript_len, tau, LagPreset::NonHotstart)?;
        Ok(HotstartComparison {
            transcript_len,
            tau,
            hotstart: self.fraction(&hot)?,
            non_hotstart: self.fraction(&cold)?,
        })
    }
}
