//! model::errors — error type for the UTR coverage model.
//!
//! Purpose
//! -------
//! Provide the single error enum [`CoverageError`] and result alias
//! [`CoverageResult`] used by every stage of the coverage model (parameter
//! validation, start-position mixture, required-bases map, read-length
//! survival, histogram accumulation) and by the parameter sweep.
//!
//! Key behaviors
//! -------------
//! - Attach human-readable `Display` messages that embed the offending value
//!   so failures are diagnosable from a log line alone.
//! - Convert `statrs` constructor errors (`ExpError`, `NormalError`) into
//!   [`CoverageError`] so `?` works across the distribution boundary.
//! - Map every variant to a Python `ValueError` when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All model functions are deterministic; an error always signals an
//!   invalid parameter or a programming error and is never retried.
//! - Variants are small and `Clone`, so they can be collected out of a
//!   parallel sweep without allocation beyond the `String` payloads.
//!
//! Conventions
//! -----------
//! - Indices are 0-based grid indices, values are base counts unless a
//!   variant states otherwise.
//! - Parameter errors are raised before any array is allocated.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` messages embed their payloads and that
//!   `statrs` errors map onto the expected variants.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::{ExpError, NormalError};

/// Result alias for coverage-model operations that may produce [`CoverageError`].
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Unified error type for the coverage model and sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageError {
    // ---- Parameter validation ----
    /// Polymerase rate must be finite and > 0.
    InvalidRate { value: f64 },

    /// Acquisition time limit must be finite and > 0.
    InvalidAcquisitionLimit { value: f64 },

    /// Read-length decay constant must be finite and > 0.
    InvalidTau { value: f64 },

    /// Lag time must be finite and >= 0.
    InvalidLagTime { value: f64 },

    /// Number of folded template wraps must be at least one.
    InvalidWraps { wraps: usize },

    // ---- Grid / shape ----
    /// Template lengths for this transcript overflow base-count arithmetic.
    TemplateTooLong { transcript_len: usize },

    /// Position grid does not cover `[0, 2 × half_cycle)`.
    GridTooShort { start: i64, end: i64, required: i64 },

    /// Two arrays combined pointwise have different lengths.
    LengthMismatch { expected: usize, actual: usize },

    /// A required-bases value does not fit the destination histogram.
    RequiredBasesOutOfRange { index: usize, value: usize, len: usize },

    /// The requirement formulas produced a negative base count.
    NegativeRequirement { index: usize, value: i64 },

    // ---- Numerics ----
    /// A normalizing constant was not strictly positive.
    DegenerateNormalization { stage: &'static str, mass: f64 },

    // ---- Sweep ----
    /// A sweep axis has no values.
    EmptyAxis { axis: &'static str },

    /// A sweep axis contains an invalid value.
    InvalidAxisValue { axis: &'static str, value: f64 },

    /// Lookup by parameter value found no matching axis entry.
    AxisValueNotFound { axis: &'static str, value: f64 },

    /// The worker pool for a parallel sweep could not be built.
    ThreadPool { reason: String },

    // ---- statrs distribution errors ----
    /// Wrapper for `statrs::distribution::ExpError`.
    InvalidExpParam,

    /// Wrapper for `statrs::distribution::NormalError`.
    InvalidNormalParam,

    /// ---- Fallback ----
    UnknownError,
}

impl std::error::Error for CoverageError {}

impl std::fmt::Display for CoverageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter validation ----
            CoverageError::InvalidRate { value } => {
                write!(f, "Polymerase rate must be finite and > 0; got: {value}")
            }
            CoverageError::InvalidAcquisitionLimit { value } => {
                write!(f, "Acquisition time limit must be finite and > 0; got: {value}")
            }
            CoverageError::InvalidTau { value } => {
                write!(f, "Read-length tau must be finite and > 0; got: {value}")
            }
            CoverageError::InvalidLagTime { value } => {
                write!(f, "Lag time must be finite and >= 0; got: {value}")
            }
            CoverageError::InvalidWraps { wraps } => {
                write!(f, "Number of template wraps must be at least 1; got: {wraps}")
            }
            // ---- Grid / shape ----
            CoverageError::TemplateTooLong { transcript_len } => {
                write!(f, "Template for transcript length {transcript_len} is too long")
            }
            CoverageError::GridTooShort { start, end, required } => {
                write!(
                    f,
                    "Position grid [{start}, {end}) must start at or before 0 and reach {required}"
                )
            }
            CoverageError::LengthMismatch { expected, actual } => {
                write!(f, "Array length mismatch: expected {expected}, got {actual}")
            }
            CoverageError::RequiredBasesOutOfRange { index, value, len } => {
                write!(
                    f,
                    "Required bases {value} at grid index {index} exceeds histogram length {len}"
                )
            }
            CoverageError::NegativeRequirement { index, value } => {
                write!(f, "Required bases at grid index {index} is negative: {value}")
            }
            // ---- Numerics ----
            CoverageError::DegenerateNormalization { stage, mass } => {
                write!(f, "Cannot normalize {stage}: total mass is {mass}")
            }
            // ---- Sweep ----
            CoverageError::EmptyAxis { axis } => {
                write!(f, "Sweep axis '{axis}' must contain at least one value.")
            }
            CoverageError::InvalidAxisValue { axis, value } => {
                write!(f, "Sweep axis '{axis}' contains an invalid value: {value}")
            }
            CoverageError::AxisValueNotFound { axis, value } => {
                write!(f, "Value {value} is not on sweep axis '{axis}'.")
            }
            CoverageError::ThreadPool { reason } => {
                write!(f, "Failed to build sweep thread pool: {reason}")
            }
            // ---- statrs distribution errors ----
            CoverageError::InvalidExpParam => {
                write!(f, "Exponential distribution requires rate > 0.")
            }
            CoverageError::InvalidNormalParam => {
                write!(f, "Normal distribution requires a finite mean and std > 0.")
            }
            CoverageError::UnknownError => {
                write!(f, "An unknown error occurred in the distribution.")
            }
        }
    }
}

/// Convert a [`CoverageError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<CoverageError> for PyErr {
    fn from(err: CoverageError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ExpError> for CoverageError {
    fn from(_: ExpError) -> CoverageError {
        CoverageError::InvalidExpParam
    }
}

impl From<NormalError> for CoverageError {
    fn from(err: NormalError) -> CoverageError {
        match err {
            NormalError::MeanInvalid | NormalError::StandardDeviationInvalid => {
                CoverageError::InvalidNormalParam
            }
            #[allow(unreachable_patterns)]
            _ => CoverageError::UnknownError,
        }
    }
}
