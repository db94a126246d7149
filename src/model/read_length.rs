//! model::read_length — truncated exponential read-length model.
//!
//! Purpose
//! -------
//! Model the number of bases a polymerase reads before photodamage ends the
//! read. Photodamage strikes with constant probability per base, giving an
//! exponential read length with scale `tau`, hard-capped by the acquisition
//! window: no read can exceed `rate × acquisition_limit` bases.
//!
//! Key behaviors
//! -------------
//! - Evaluate the `Exp(1/tau)` density on the integer grid `0..len`.
//! - Zero the density beyond the acquisition cap and renormalize it by its
//!   trapezoidal integral.
//! - Accumulate the CDF with the cumulative trapezoidal rule and expose the
//!   survival complement `P(read ≥ n) = 1 − CDF(n)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The truncated density integrates to 1 under the trapezoidal rule.
//! - `cdf[0] = 0`, `cdf` is non-decreasing and ends at 1, so the survival
//!   complement lies in `[0, 1]` and is non-increasing.
//! - A cap that removes all mass fails with
//!   [`CoverageError::DegenerateNormalization`] instead of producing NaN.
//!
//! Conventions
//! -----------
//! - Grid spacing is one base; the evaluation length is at least the
//!   destination histogram length and at least `ceil(3 × tau)`, the latter
//!   limited to two points past the acquisition cap since the density is
//!   zero beyond it.
//! - The CDF is the cumulative trapezoidal integral, not a plain running sum
//!   of the density. A running sum starts at `density[0]` and ends near
//!   `1 + 1/(2·tau)`, so a survival complement built from it is shifted by
//!   about `1/(2·tau)` and clipped at 0 near the cap. Fractions computed
//!   here therefore differ from running-sum figures by roughly that amount
//!   (about 1.7e-4 at tau 3000).

use crate::model::{
    errors::{CoverageError, CoverageResult},
    params::InstrumentParams,
    validation::{validate_mass, validate_tau},
};
use ndarray::{Array1, s};
use statrs::distribution::{Continuous, Exp};

/// Multiple of tau the evaluation grid must span.
pub const TAU_SPAN: f64 = 3.0;

/// Smallest trapezoidal mass accepted as a normalizer.
const DENSITY_MASS_FLOOR: f64 = 1e-300;

/// ReadLengthModel — exponential read lengths capped by the acquisition window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadLengthModel {
    tau: f64,
    max_read_bases: f64,
}

/// Density, CDF and survival complement on a common grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadLengthDistribution {
    pub density: Array1<f64>,
    pub cdf: Array1<f64>,
    pub survival: Array1<f64>,
}

impl ReadLengthModel {
    /// # Errors
    /// [`CoverageError::InvalidTau`] if `tau` is not finite and > 0.
    pub fn new(tau: f64, instrument: &InstrumentParams) -> CoverageResult<Self> {
        let tau = validate_tau(tau)?;
        Ok(ReadLengthModel { tau, max_read_bases: instrument.max_read_bases() })
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn max_read_bases(&self) -> f64 {
        self.max_read_bases
    }

    /// Evaluation length covering `required_len` and `3 × tau`; the tau span
    /// stops two points past the acquisition cap.
    pub fn evaluation_len(&self, required_len: usize) -> usize {
        let span = (TAU_SPAN * self.tau).ceil().min(self.max_read_bases.floor() + 2.0);
        required_len.max(span as usize)
    }

    /// Truncated, normalized density on `0..len`.
    ///
    /// # Errors
    /// - [`CoverageError::InvalidExpParam`] if `1/tau` overflows.
    /// - [`CoverageError::DegenerateNormalization`] if the cap is below one
    ///   base (no read-length interval is left to integrate over) or the grid
    ///   has fewer than two points.
    pub fn density(&self, len: usize) -> CoverageResult<Array1<f64>> {
        if self.max_read_bases < 1.0 {
            return Err(CoverageError::DegenerateNormalization {
                stage: "read-length density",
                mass: 0.0,
            });
        }
        let dist = Exp::new(1.0 / self.tau)?;
        let mut density = Array1::from_iter((0..len).map(|x| {
            let x = x as f64;
            if x > self.max_read_bases { 0.0 } else { dist.pdf(x) }
        }));
        let mass = validate_mass("read-length density", trapezoid(&density), DENSITY_MASS_FLOOR)?;
        density /= mass;
        Ok(density)
    }

    /// Density, CDF and survival complement on `0..evaluation_len(required_len)`.
    ///
    /// # Errors
    /// Propagates [`ReadLengthModel::density`] errors.
    pub fn distribution(&self, required_len: usize) -> CoverageResult<ReadLengthDistribution> {
        let density = self.density(self.evaluation_len(required_len))?;
        let cdf = cumulative_trapezoid(&density);
        let survival = cdf.mapv(|c| (1.0 - c).max(0.0));
        Ok(ReadLengthDistribution { density, cdf, survival })
    }

    /// Survival complement sliced to exactly `len` entries.
    ///
    /// # Errors
    /// Propagates [`ReadLengthModel::density`] errors.
    pub fn survival(&self, len: usize) -> CoverageResult<Array1<f64>> {
        let dist = self.distribution(len)?;
        Ok(dist.survival.slice(s![..len]).to_owned())
    }
}

/// Trapezoidal integral with unit spacing.
pub fn trapezoid(values: &Array1<f64>) -> f64 {
    values.windows(2).into_iter().map(|w| 0.5 * (w[0] + w[1])).sum()
}

/// Running trapezoidal integral with unit spacing; `out[0] = 0`.
pub fn cumulative_trapezoid(values: &Array1<f64>) -> Array1<f64> {
    let mut out = Array1::<f64>::zeros(values.len());
    let mut acc = 0.0;
    for i in 1..values.len() {
        acc += 0.5 * (values[i - 1] + values[i]);
        out[i] = acc;
    }
    out
}

/// Convenience wrapper: survival complement for `tau` under `instrument`.
///
/// # Errors
/// [`CoverageError::InvalidTau`] and the errors of [`ReadLengthModel::density`].
pub fn read_length_survival(
    tau: f64, instrument: &InstrumentParams, len: usize,
) -> CoverageResult<Array1<f64>> {
    ReadLengthModel::new(tau, instrument)?.survival(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Normalization of the truncated density.
    // - CDF endpoints and survival monotonicity.
    // - The acquisition cap and the degenerate-cap error.
    // - The tau → 0 limit.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the truncated density integrates to one for several taus.
    //
    // Given
    // -----
    // - Reference instrument (cap 6600 bases), taus 500, 3000, 9000 and an
    //   evaluation length of 7705.
    //
    // Expect
    // ------
    // - Trapezoidal integral within 1e-12 of 1; zero density beyond 6600.
    fn truncated_density_integrates_to_one() {
        // Arrange
        let instrument = InstrumentParams::default();

        for tau in [500.0, 3000.0, 9000.0] {
            let model = ReadLengthModel::new(tau, &instrument).expect("valid tau");

            // Act
            let density = model.density(model.evaluation_len(7705)).expect("density normalizes");

            // Assert
            assert_abs_diff_eq!(trapezoid(&density), 1.0, epsilon = 1e-12);
            assert_eq!(density[6601], 0.0);
            assert!(density[6600] > 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check CDF endpoints and survival monotonicity.
    //
    // Given
    // -----
    // - tau = 2000 on the reference instrument.
    //
    // Expect
    // ------
    // - cdf[0] = 0, cdf[last] = 1, survival non-increasing in [0, 1],
    //   survival zero beyond the cap.
    fn cdf_endpoints_and_survival_monotone() {
        // Arrange
        let model = ReadLengthModel::new(2000.0, &InstrumentParams::default()).expect("valid tau");

        // Act
        let dist = model.distribution(7705).expect("distribution builds");

        // Assert
        assert_eq!(dist.cdf[0], 0.0);
        assert_abs_diff_eq!(dist.cdf[dist.cdf.len() - 1], 1.0, epsilon = 1e-12);
        assert_eq!(dist.survival[0], 1.0);
        for w in dist.survival.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert!(dist.survival.iter().all(|&s| (0.0..=1.0).contains(&s)));
        assert_abs_diff_eq!(dist.survival[7000], 0.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a cap that removes all mass fails explicitly.
    //
    // Given
    // -----
    // - An instrument whose window allows 0.5 bases (rate 0.001, 500 s).
    //
    // Expect
    // ------
    // - `DegenerateNormalization` instead of NaN.
    fn zero_mass_cap_is_rejected() {
        // Arrange
        let instrument =
            InstrumentParams::new(0.001, 500.0, 130, 250, 44, 80).expect("valid instrument");
        let model = ReadLengthModel::new(1000.0, &instrument).expect("valid tau");

        // Act
        let result = model.density(100);

        // Assert
        assert!(matches!(result, Err(CoverageError::DegenerateNormalization { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify the tau → 0 limit: survival vanishes away from zero.
    //
    // Given
    // -----
    // - tau = 1e-3.
    //
    // Expect
    // ------
    // - survival[0] = 1 and survival[n] ≈ 0 for n ≥ 1.
    fn vanishing_tau_survival_is_zero_past_origin() {
        // Act
        let survival =
            read_length_survival(1e-3, &InstrumentParams::default(), 100).expect("valid tau");

        // Assert
        assert_eq!(survival.len(), 100);
        assert_eq!(survival[0], 1.0);
        assert!(survival.iter().skip(1).all(|&s| s < 1e-12));
    }

    #[test]
    // Purpose
    // -------
    // Check the evaluation length rule and the trapezoid helpers.
    //
    // Given
    // -----
    // - Reference instrument (cap 6600 bases), taus 2000 and 3000.
    //
    // Expect
    // ------
    // - max(required, min(ceil(3 tau), 6602)); trapezoid([1, 1, 1]) = 2 and
    //   the cumulative version [0, 1, 2].
    fn evaluation_len_and_trapezoid_helpers() {
        // Arrange
        let instrument = InstrumentParams::default();
        let short = ReadLengthModel::new(2000.0, &instrument).expect("valid tau");
        let model = ReadLengthModel::new(3000.0, &instrument).expect("valid tau");
        let ones = Array1::from(vec![1.0, 1.0, 1.0]);

        // Act & Assert
        assert_eq!(short.evaluation_len(100), 6000);
        assert_eq!(model.evaluation_len(100), 6602);
        assert_eq!(model.evaluation_len(7705), 7705);
        assert_eq!(model.evaluation_len(10_000), 10_000);
        assert_eq!(trapezoid(&ones), 2.0);
        assert_eq!(cumulative_trapezoid(&ones), Array1::from(vec![0.0, 1.0, 2.0]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an enormous but finite tau evaluates on a bounded grid instead
    // of sizing it from `3 × tau`.
    //
    // Given
    // -----
    // - Reference instrument (cap 6600 bases), taus 1e19 and 1e9, survival
    //   on the reference histogram length 7705.
    //
    // Expect
    // ------
    // - Both succeed with 7705 entries and an evaluation length of 7705.
    // - Both are essentially uniform on [0, 6600], so their survival
    //   complements agree within 1e-5.
    fn huge_tau_uses_bounded_grid() {
        // Arrange
        let instrument = InstrumentParams::default();
        let huge = ReadLengthModel::new(1e19, &instrument).expect("finite tau is valid");
        let large = ReadLengthModel::new(1e9, &instrument).expect("finite tau is valid");

        // Act
        let s_huge = huge.survival(7705).expect("bounded grid evaluates");
        let s_large = large.survival(7705).expect("bounded grid evaluates");

        // Assert
        assert_eq!(huge.evaluation_len(7705), 7705);
        assert_eq!(s_huge.len(), 7705);
        assert_eq!(s_huge[0], 1.0);
        assert_abs_diff_eq!(s_huge[3300], 0.5, epsilon = 1e-3);
        for (a, b) in s_huge.iter().zip(s_large.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }
}
