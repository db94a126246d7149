//! model::validation — scalar and shape guards for the coverage model.
//!
//! Purpose
//! -------
//! Centralize the small checks that every model entry point performs before
//! allocating arrays: positive finite rates and time limits, positive finite
//! read-length tau, non-negative lag time, and equal lengths for arrays that
//! are combined pointwise.
//!
//! Conventions
//! -----------
//! - Helpers return the validated value so constructors can write
//!   `let rate = validate_rate(rate)?;`.
//! - This module performs no I/O and no logging.

use crate::model::errors::{CoverageError, CoverageResult};

/// Validate the polymerase incorporation rate (bases per second).
///
/// # Errors
/// [`CoverageError::InvalidRate`] if `rate` is NaN, ±∞ or ≤ 0.
pub fn validate_rate(rate: f64) -> CoverageResult<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoverageError::InvalidRate { value: rate });
    }
    Ok(rate)
}

/// Validate the acquisition time limit (seconds).
///
/// # Errors
/// [`CoverageError::InvalidAcquisitionLimit`] if `limit` is NaN, ±∞ or ≤ 0.
pub fn validate_acquisition_limit(limit: f64) -> CoverageResult<f64> {
    if !limit.is_finite() || limit <= 0.0 {
        return Err(CoverageError::InvalidAcquisitionLimit { value: limit });
    }
    Ok(limit)
}

/// Validate the read-length decay constant tau (bases).
///
/// # Errors
/// [`CoverageError::InvalidTau`] if `tau` is NaN, ±∞ or ≤ 0.
pub fn validate_tau(tau: f64) -> CoverageResult<f64> {
    if !tau.is_finite() || tau <= 0.0 {
        return Err(CoverageError::InvalidTau { value: tau });
    }
    Ok(tau)
}

/// Validate the pre-acquisition lag time (seconds). Zero is allowed.
///
/// # Errors
/// [`CoverageError::InvalidLagTime`] if `lag_time` is NaN, ±∞ or < 0.
pub fn validate_lag_time(lag_time: f64) -> CoverageResult<f64> {
    if !lag_time.is_finite() || lag_time < 0.0 {
        return Err(CoverageError::InvalidLagTime { value: lag_time });
    }
    Ok(lag_time)
}

/// Check that two pointwise-combined arrays have the same length.
///
/// # Errors
/// [`CoverageError::LengthMismatch`] with `expected` and `actual` lengths.
pub fn validate_same_len(expected: usize, actual: usize) -> CoverageResult<()> {
    if expected != actual {
        return Err(CoverageError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Check that a normalizing mass is usable as a divisor.
///
/// # Errors
/// [`CoverageError::DegenerateNormalization`] if `mass` is not finite or is
/// at most `floor`.
pub fn validate_mass(stage: &'static str, mass: f64, floor: f64) -> CoverageResult<f64> {
    if !mass.is_finite() || mass <= floor {
        return Err(CoverageError::DegenerateNormalization { stage, mass });
    }
    Ok(mass)
}
