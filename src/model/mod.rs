//! model — the UTR coverage probability model.
//!
//! Purpose
//! -------
//! Estimate the fraction of transcripts whose 5′ and 3′ UTRs are both read by
//! a single-molecule real-time sequencing read on a circular template, as a
//! function of transcript length, read-length tau and pre-acquisition lag.
//!
//! Key behaviors
//! -------------
//! - [`params`]: validated instrument constants and per-cell coordinates.
//! - [`geometry`]: half/full cycle lengths, the analytical required-bases
//!   bound, and the position grid.
//! - [`start_position`]: Gaussian-mixture start-offset mass folded over
//!   several template laps.
//! - [`requirement`]: four-case map from start offset to bases still needed.
//! - [`read_length`]: truncated exponential read lengths and their survival
//!   complement.
//! - [`histogram`] and [`fraction`]: scatter-add into a bases-to-go histogram
//!   and weight it by the survival complement.
//! - [`pipeline`]: [`CoverageModel`], composing all of the above.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every stage is a pure function of immutable inputs; arrays are freshly
//!   allocated per evaluation.
//! - Probability arrays on the position grid sum to 1; the histogram inherits
//!   that mass; the survival complement lies in `[0, 1]`.
//! - Invalid parameters and numerical degeneracies surface as
//!   [`CoverageError`] before or instead of NaN/Inf.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Position-grid arrays are indexed by grid index,
//!   histogram and survival arrays by number of bases.
//! - Times in seconds, rates in bases per second, lengths and tau in bases.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use utr_coverage::model::{CellParams, CoverageModel};
//!
//! let model = CoverageModel::default();
//! let cell = CellParams::new(3500, 3000.0, 900.0)?;
//! let fraction = model.fraction(&cell)?;
//! assert!((0.0..=1.0).contains(&fraction));
//! # Ok::<(), utr_coverage::model::CoverageError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own invariants; the
//!   integration test `tests/integration_coverage_pipeline.rs` exercises the
//!   end-to-end properties on the reference scenario and the sweep.

pub mod errors;
pub mod fraction;
pub mod geometry;
pub mod histogram;
pub mod params;
pub mod pipeline;
pub mod read_length;
pub mod requirement;
pub mod start_position;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{CoverageError, CoverageResult};
pub use self::geometry::{PositionGrid, TemplateGeometry, half_cycle_len};
pub use self::params::{CellParams, InstrumentParams, LagPreset};
pub use self::pipeline::{CoverageModel, CoverageOutcome, HotstartComparison};
pub use self::read_length::{ReadLengthDistribution, ReadLengthModel};
pub use self::requirement::{CoverageCase, RequiredBases};
pub use self::start_position::StartModelOptions;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        CellParams, CoverageError, CoverageModel, CoverageOutcome, CoverageResult,
        InstrumentParams, LagPreset, StartModelOptions,
    };
}
