//! model::requirement — bases still needed to cover both UTRs.
//!
//! Purpose
//! -------
//! Map every unrolled start offset to the number of further bases a read must
//! produce before both the 5′ and the 3′ UTR have been observed (each with at
//! least `min_map_bases` recognized bases).
//!
//! Key behaviors
//! -------------
//! - Classify the full-cycle residue `x mod 2h` into one of four
//!   [`CoverageCase`]s: catch or miss the nearest UTR, on the forward or the
//!   reverse strand.
//! - Evaluate the case formula with the half-cycle residue `x mod h`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The four cases partition `[0, 2h)`: boundaries are computed in signed
//!   arithmetic and clamped to the strand they belong to, so a
//!   `min_map_bases` larger than a UTR empties that catch case instead of
//!   overlapping the neighbouring miss case.
//! - Residues are Euclidean, so negative grid offsets are valid.
//! - Every returned value lies in `1..=geometry.max_required_bases`.

use crate::model::{
    errors::{CoverageError, CoverageResult},
    geometry::{PositionGrid, TemplateGeometry},
    params::InstrumentParams,
};
use ndarray::Array1;

/// Geometric situation of a start offset within one full template cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageCase {
    /// Forward strand, early enough to recognize the 5′ UTR.
    ForwardCatch,
    /// Forward strand, 5′ UTR missed; read through to the far strand.
    ForwardMiss,
    /// Reverse strand, early enough to recognize the 3′ UTR.
    ReverseCatch,
    /// Reverse strand, 3′ UTR missed.
    ReverseMiss,
}

impl CoverageCase {
    /// Case number 1..=4 in cycle order.
    pub const fn code(self) -> u8 {
        match self {
            CoverageCase::ForwardCatch => 1,
            CoverageCase::ForwardMiss => 2,
            CoverageCase::ReverseCatch => 3,
            CoverageCase::ReverseMiss => 4,
        }
    }
}

/// Case boundaries on the full-cycle residue for one geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseBounds {
    forward_catch_end: i64,
    half_cycle: i64,
    reverse_catch_end: i64,
}

impl CaseBounds {
    pub fn new(instrument: &InstrumentParams, geometry: &TemplateGeometry) -> Self {
        let h = geometry.half_cycle as i64;
        let m = instrument.min_map_bases() as i64;
        let five = instrument.five_prime_utr() as i64;
        let three = instrument.three_prime_utr() as i64;
        CaseBounds {
            forward_catch_end: (five - m).clamp(0, h),
            half_cycle: h,
            reverse_catch_end: (h + three - m).clamp(h, 2 * h),
        }
    }

    /// Case of a full-cycle residue in `[0, 2h)`.
    pub fn classify(&self, full_residue: i64) -> CoverageCase {
        if full_residue < self.forward_catch_end {
            CoverageCase::ForwardCatch
        } else if full_residue < self.half_cycle {
            CoverageCase::ForwardMiss
        } else if full_residue < self.reverse_catch_end {
            CoverageCase::ReverseCatch
        } else {
            CoverageCase::ReverseMiss
        }
    }
}

/// Required bases for one start offset.
///
/// Returns the case and the (signed) number of bases; callers convert to an
/// index after checking the sign.
pub fn required_bases_at(
    offset: i64, instrument: &InstrumentParams, geometry: &TemplateGeometry, bounds: &CaseBounds,
) -> (CoverageCase, i64) {
    let h = geometry.half_cycle as i64;
    let l = geometry.transcript_len as i64;
    let five = instrument.five_prime_utr() as i64;
    let three = instrument.three_prime_utr() as i64;
    let hairpin = instrument.hairpin() as i64;
    let m = instrument.min_map_bases() as i64;

    let full_residue = offset.rem_euclid(2 * h);
    let half_residue = offset.rem_euclid(h);

    let case = bounds.classify(full_residue);
    let bases = match case {
        CoverageCase::ForwardCatch => five - half_residue + l + m,
        CoverageCase::ForwardMiss => five - half_residue + m + 2 * l + 2 * three + hairpin,
        CoverageCase::ReverseCatch => three - half_residue + l + m,
        CoverageCase::ReverseMiss => three - half_residue + m + 2 * l + 2 * five + hairpin,
    };
    (case, bases)
}

/// Required bases and case labels over a whole position grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredBases {
    pub bases: Array1<usize>,
    pub cases: Vec<CoverageCase>,
}

/// Evaluate the requirement map on every offset of `grid`.
///
/// # Errors
/// [`CoverageError::NegativeRequirement`] if a formula yields a negative
/// count, which indicates a geometry the formulas do not describe.
pub fn required_bases(
    grid: &PositionGrid, instrument: &InstrumentParams, geometry: &TemplateGeometry,
) -> CoverageResult<RequiredBases> {
    let bounds = CaseBounds::new(instrument, geometry);
    let mut bases = Array1::<usize>::zeros(grid.len());
    let mut cases = Vec::with_capacity(grid.len());

    for (index, offset) in grid.offsets().enumerate() {
        let (case, value) = required_bases_at(offset, instrument, geometry, &bounds);
        bases[index] =
            usize::try_from(value).map_err(|_| CoverageError::NegativeRequirement { index, value })?;
        cases.push(case);
    }
    Ok(RequiredBases { bases, cases })
}
