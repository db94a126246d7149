//! sweep — coverage fractions over a transcript × tau × lag grid.
//!
//! Purpose
//! -------
//! Evaluate a [`CoverageModel`](crate::model::CoverageModel) on the cartesian
//! product of three axes and expose the resulting table by index, by value,
//! per lag, or as flat records.
//!
//! Key behaviors
//! -------------
//! - [`SweepAxes`]: validated axes; [`SweepAxes::reference`] is the study
//!   grid.
//! - [`run_sweep`]: evaluates all cells, optionally on a rayon pool.
//! - [`SweepResult`]: `[tau, transcript, lag]` table with lookups.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use utr_coverage::model::CoverageModel;
//! use utr_coverage::sweep::{SweepAxes, SweepOptions, run_sweep};
//!
//! let axes = SweepAxes::new(vec![1000, 3500], vec![3000.0], vec![10.0, 900.0])?;
//! let result = run_sweep(&CoverageModel::default(), &axes, &SweepOptions::default())?;
//! assert_eq!(result.fractions().dim(), (1, 2, 2));
//! # Ok::<(), utr_coverage::model::CoverageError>(())
//! ```

pub mod axes;
pub mod result;
pub mod run;

pub use self::axes::SweepAxes;
pub use self::result::{SweepCell, SweepResult};
pub use self::run::{SweepOptions, run_sweep};
