//! model::start_position — where on the unrolled template sequencing begins.
//!
//! Purpose
//! -------
//! Compute the probability mass function of the unrolled start offset at the
//! moment acquisition begins. During the lag time the polymerase advances
//! `lag_time × rate` bases on average; incorporation times are modeled as a
//! random walk, so the advance is Gaussian with variance equal to its mean
//! (in bases).
//!
//! Key behaviors
//! -------------
//! - Evaluate a mixture of `2 × wraps` Gaussian components on the position
//!   grid: for each wrap `w` (offset `2·w·h`, folding later laps of the
//!   circular template back onto the grid) and each strand `s` (shift `s·h`),
//!   weight one half.
//! - Renormalize the mixture so it sums to one over the grid.
//! - Replace zero-width Gaussians (lag time 0) with unit spikes on the grid
//!   point nearest to each component centre.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned array has exactly `grid.len()` entries, is non-negative and
//!   sums to 1 within floating tolerance.
//! - The position grid has already been checked against the geometry.
//!
//! Conventions
//! -----------
//! - Component centres in grid coordinates are `mean + s·h − 2·w·h`, which is
//!   the same as evaluating `N(x + 2·w·h; mean + s·h, std)`.

use crate::model::{
    errors::{CoverageError, CoverageResult},
    geometry::{PositionGrid, TemplateGeometry},
    validation::{validate_lag_time, validate_mass, validate_rate},
};
use ndarray::Array1;
use statrs::distribution::{Continuous, Normal};

/// Number of template laps folded onto the grid by default.
pub const DEFAULT_WRAPS: usize = 3;

/// Below this standard deviation (bases) a component is treated as a spike.
pub const DEGENERATE_STD: f64 = 1e-9;

/// Smallest total mixture mass accepted as a normalizer.
const MIXTURE_MASS_FLOOR: f64 = 1e-300;

/// Options for the start-position mixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartModelOptions {
    wraps: usize,
}

impl StartModelOptions {
    /// # Errors
    /// [`CoverageError::InvalidWraps`] if `wraps == 0`.
    pub fn new(wraps: usize) -> CoverageResult<Self> {
        if wraps == 0 {
            return Err(CoverageError::InvalidWraps { wraps });
        }
        Ok(StartModelOptions { wraps })
    }

    pub fn wraps(&self) -> usize {
        self.wraps
    }
}

impl Default for StartModelOptions {
    fn default() -> Self {
        StartModelOptions { wraps: DEFAULT_WRAPS }
    }
}

/// Mean and standard deviation (bases) of the polymerase advance during the
/// lag time.
///
/// # Errors
/// - [`CoverageError::InvalidLagTime`] if `lag_time` is negative or non-finite.
/// - [`CoverageError::InvalidRate`] if `rate` is not finite and > 0.
pub fn advance_moments(lag_time: f64, rate: f64) -> CoverageResult<(f64, f64)> {
    let lag_time = validate_lag_time(lag_time)?;
    let rate = validate_rate(rate)?;
    let mean = lag_time * rate;
    Ok((mean, mean.sqrt()))
}

/// Start-position mass over `grid`.
///
/// Parameters
/// ----------
/// - `grid`: position grid, already checked to cover `[0, 2h)`.
/// - `geometry`: template geometry supplying `h`.
/// - `lag_time`: seconds between reaction start and acquisition start.
/// - `rate`: polymerase bases per second.
/// - `options`: number of folded wraps.
///
/// Returns
/// -------
/// `CoverageResult<Array1<f64>>` of length `grid.len()`, summing to 1.
///
/// Errors
/// ------
/// - Parameter errors from [`advance_moments`].
/// - [`CoverageError::DegenerateNormalization`] if no component places mass
///   on the grid.
pub fn start_position_mass(
    grid: &PositionGrid, geometry: &TemplateGeometry, lag_time: f64, rate: f64,
    options: &StartModelOptions,
) -> CoverageResult<Array1<f64>> {
    let (mean, std) = advance_moments(lag_time, rate)?;
    let h = geometry.half_cycle as f64;

    let mut mass = Array1::<f64>::zeros(grid.len());
    if std < DEGENERATE_STD {
        add_spikes(&mut mass, grid, mean, h, options.wraps);
    } else {
        let component = Normal::new(mean, std)?;
        let shifted = Normal::new(mean + h, std)?;
        let values = grid.values();
        for w in 0..options.wraps {
            let offset = 2.0 * w as f64 * h;
            for (m, &x) in mass.iter_mut().zip(values.iter()) {
                *m += 0.5 * component.pdf(x + offset) + 0.5 * shifted.pdf(x + offset);
            }
        }
    }

    let total = validate_mass("start-position mixture", mass.sum(), MIXTURE_MASS_FLOOR)?;
    mass /= total;
    Ok(mass)
}

/// Put half a unit of mass on the grid point nearest each component centre.
fn add_spikes(mass: &mut Array1<f64>, grid: &PositionGrid, mean: f64, h: f64, wraps: usize) {
    for w in 0..wraps {
        for s in 0..2 {
            let centre = mean + s as f64 * h - 2.0 * w as f64 * h;
            if let Some(i) = grid.index_of(centre.round() as i64) {
                mass[i] += 0.5;
            }
        }
    }
}
