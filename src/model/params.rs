//! model::params — immutable parameter bundles for one model evaluation.
//!
//! Purpose
//! -------
//! Replace free-form parameter dictionaries with two validated structs:
//! [`InstrumentParams`] (polymerase, acquisition window and library geometry
//! shared by every cell of a sweep) and [`CellParams`] (transcript length,
//! read-length tau and lag time that vary per cell).
//!
//! Key behaviors
//! -------------
//! - Validate every scalar at construction; downstream code assumes the
//!   invariants below and never re-checks them.
//! - Provide the reference instrument via `Default` and named lag presets via
//!   [`LagPreset`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `polymerase_rate > 0` and `acquisition_limit > 0`, both finite.
//! - Lengths are base counts stored as `usize`, so non-negativity is carried
//!   by the type.
//! - `tau > 0` finite, `lag_time >= 0` finite.
//!
//! Conventions
//! -----------
//! - Rates are bases per second, times are seconds, lengths and tau are bases.
//! - Structs are `Copy`; pass them by value or reference freely, they are
//!   never mutated after construction.

use crate::model::{
    errors::CoverageResult,
    validation::{validate_acquisition_limit, validate_lag_time, validate_rate, validate_tau},
};

/// Polymerase speed of the reference instrument (bases/s).
pub const DEFAULT_POLYMERASE_RATE: f64 = 2.2;
/// Acquisition window of the reference instrument (50 minutes).
pub const DEFAULT_ACQUISITION_LIMIT: f64 = 50.0 * 60.0;
/// 5′ UTR length of the reference library.
pub const DEFAULT_FIVE_PRIME_UTR: usize = 130;
/// 3′ UTR length of the reference library.
pub const DEFAULT_THREE_PRIME_UTR: usize = 250;
/// Hairpin adapter length.
pub const DEFAULT_HAIRPIN: usize = 44;
/// Bases of a UTR that must be read before it is recognized.
pub const DEFAULT_MIN_MAP_BASES: usize = 80;

/// InstrumentParams — instrument and library constants for a model run.
///
/// Fields
/// ------
/// - `polymerase_rate`: bases incorporated per second.
/// - `acquisition_limit`: acquisition (movie) duration in seconds; no read can
///   be longer than `polymerase_rate × acquisition_limit` bases.
/// - `five_prime_utr`, `three_prime_utr`: UTR lengths in bases.
/// - `hairpin`: hairpin adapter length in bases.
/// - `min_map_bases`: bases of a UTR needed to recognize it.
///
/// Fields are private so the validated invariants cannot be broken after
/// construction; use the accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentParams {
    polymerase_rate: f64,
    acquisition_limit: f64,
    five_prime_utr: usize,
    three_prime_utr: usize,
    hairpin: usize,
    min_map_bases: usize,
}

impl InstrumentParams {
    /// Construct validated instrument parameters.
    ///
    /// # Errors
    /// - [`CoverageError::InvalidRate`](crate::model::errors::CoverageError::InvalidRate)
    ///   if `polymerase_rate` is not finite and > 0.
    /// - [`CoverageError::InvalidAcquisitionLimit`](crate::model::errors::CoverageError::InvalidAcquisitionLimit)
    ///   if `acquisition_limit` is not finite and > 0.
    pub fn new(
        polymerase_rate: f64, acquisition_limit: f64, five_prime_utr: usize,
        three_prime_utr: usize, hairpin: usize, min_map_bases: usize,
    ) -> CoverageResult<Self> {
        let polymerase_rate = validate_rate(polymerase_rate)?;
        let acquisition_limit = validate_acquisition_limit(acquisition_limit)?;
        Ok(InstrumentParams {
            polymerase_rate,
            acquisition_limit,
            five_prime_utr,
            three_prime_utr,
            hairpin,
            min_map_bases,
        })
    }

    pub fn polymerase_rate(&self) -> f64 {
        self.polymerase_rate
    }

    pub fn acquisition_limit(&self) -> f64 {
        self.acquisition_limit
    }

    pub fn five_prime_utr(&self) -> usize {
        self.five_prime_utr
    }

    pub fn three_prime_utr(&self) -> usize {
        self.three_prime_utr
    }

    pub fn hairpin(&self) -> usize {
        self.hairpin
    }

    pub fn min_map_bases(&self) -> usize {
        self.min_map_bases
    }

    /// Longest read the acquisition window allows, in bases.
    pub fn max_read_bases(&self) -> f64 {
        self.polymerase_rate * self.acquisition_limit
    }
}

impl Default for InstrumentParams {
    /// Reference instrument: 2.2 bases/s, 50 min acquisition, 130/250 base
    /// UTRs, 44 base hairpin, 80 bases to recognize a UTR.
    fn default() -> Self {
        InstrumentParams {
            polymerase_rate: DEFAULT_POLYMERASE_RATE,
            acquisition_limit: DEFAULT_ACQUISITION_LIMIT,
            five_prime_utr: DEFAULT_FIVE_PRIME_UTR,
            three_prime_utr: DEFAULT_THREE_PRIME_UTR,
            hairpin: DEFAULT_HAIRPIN,
            min_map_bases: DEFAULT_MIN_MAP_BASES,
        }
    }
}

/// Named lag times between complex loading and acquisition start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LagPreset {
    /// Acquisition starts almost immediately (10 s).
    Hotstart,
    /// Fifteen minutes of dead time before acquisition.
    NonHotstart,
}

impl LagPreset {
    /// Lag time in seconds.
    pub const fn seconds(self) -> f64 {
        match self {
            LagPreset::Hotstart => 10.0,
            LagPreset::NonHotstart => 15.0 * 60.0,
        }
    }
}

/// CellParams — the per-cell sweep coordinates.
///
/// - `transcript_len`: coding-region length in bases.
/// - `tau`: read-length decay constant in bases (> 0).
/// - `lag_time`: pre-acquisition dead time in seconds (>= 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParams {
    transcript_len: usize,
    tau: f64,
    lag_time: f64,
}

impl CellParams {
    /// Construct validated cell parameters.
    ///
    /// # Errors
    /// - [`CoverageError::InvalidTau`](crate::model::errors::CoverageError::InvalidTau)
    ///   if `tau` is not finite and > 0.
    /// - [`CoverageError::InvalidLagTime`](crate::model::errors::CoverageError::InvalidLagTime)
    ///   if `lag_time` is not finite and >= 0.
    pub fn new(transcript_len: usize, tau: f64, lag_time: f64) -> CoverageResult<Self> {
        let tau = validate_tau(tau)?;
        let lag_time = validate_lag_time(lag_time)?;
        Ok(CellParams { transcript_len, tau, lag_time })
    }

    /// Same as [`CellParams::new`] with the lag taken from a preset.
    pub fn with_preset(transcript_len: usize, tau: f64, preset: LagPreset) -> CoverageResult<Self> {
        Self::new(transcript_len, tau, preset.seconds())
    }

    pub fn transcript_len(&self) -> usize {
        self.transcript_len
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn lag_time(&self) -> f64 {
        self.lag_time
    }
}
