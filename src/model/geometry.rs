//! model::geometry — circular template layout and the position grid.
//!
//! Purpose
//! -------
//! Describe the circular sequencing template (5′ UTR, transcript, 3′ UTR and
//! hairpin per strand, two strands per full cycle) and the integer grid of
//! unrolled start offsets on which every probability array is defined.
//!
//! Key behaviors
//! -------------
//! - [`half_cycle_len`] sums the four segment lengths of one strand.
//! - [`TemplateGeometry`] bundles half/full cycle lengths with the largest
//!   value the required-bases map can produce, derived case by case from the
//!   requirement formulas so histograms can be pre-sized exactly.
//! - [`PositionGrid`] is a contiguous run of integer offsets and validates
//!   that it covers one full cycle `[0, 2h)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `half_cycle_len >= 1` for any template with a non-empty segment; an
//!   all-zero template is rejected by [`PositionGrid::for_geometry`] through
//!   the coverage check.
//! - `max_required_bases` bounds every output of
//!   [`required_bases`](crate::model::requirement::required_bases) for any
//!   grid offset, including negative ones (residues are Euclidean).

use crate::model::{
    errors::{CoverageError, CoverageResult},
    params::InstrumentParams,
};
use ndarray::Array1;

/// Length of one strand of the circular template:
/// `five_prime_utr + three_prime_utr + hairpin + transcript_len`, or `None`
/// on overflow.
pub fn half_cycle_len(
    transcript_len: usize, five_prime_utr: usize, three_prime_utr: usize, hairpin: usize,
) -> Option<usize> {
    five_prime_utr.checked_add(three_prime_utr)?.checked_add(hairpin)?.checked_add(transcript_len)
}

/// TemplateGeometry — cycle lengths and the required-bases bound for one
/// transcript length under one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateGeometry {
    pub transcript_len: usize,
    pub half_cycle: usize,
    pub full_cycle: usize,
    pub max_required_bases: usize,
}

impl TemplateGeometry {
    /// Build the geometry for `transcript_len` bases of coding sequence.
    ///
    /// The required-bases bound is the maximum over the non-empty cases of
    /// the requirement map, each maximized at its smallest half-cycle residue:
    ///
    /// - forward catch (`5′ > m`, residue 0): `5′ + L + m`
    /// - forward miss (residue `max(5′ − m, 0)`): `min(5′, m) + m + 2L + 2·3′ + hp`
    /// - reverse catch (`3′ > m`, residue 0): `3′ + L + m`
    /// - reverse miss (residue `max(3′ − m, 0)`): `min(3′, m) + m + 2L + 2·5′ + hp`
    ///
    /// # Errors
    /// [`CoverageError::TemplateTooLong`] if any of these lengths does not fit
    /// the signed offset arithmetic of the requirement map.
    pub fn new(instrument: &InstrumentParams, transcript_len: usize) -> CoverageResult<Self> {
        let five = instrument.five_prime_utr();
        let three = instrument.three_prime_utr();
        let hairpin = instrument.hairpin();
        let m = instrument.min_map_bases();
        let l = transcript_len;

        let bounds = || -> Option<(usize, usize, usize)> {
            let half_cycle = half_cycle_len(l, five, three, hairpin)?;
            let full_cycle = half_cycle.checked_mul(2)?;
            let two_l = l.checked_mul(2)?;
            let miss_base = m.checked_add(two_l)?.checked_add(hairpin)?;
            let forward_miss =
                miss_base.checked_add(five.min(m))?.checked_add(three.checked_mul(2)?)?;
            let reverse_miss =
                miss_base.checked_add(three.min(m))?.checked_add(five.checked_mul(2)?)?;
            let mut max_required = forward_miss.max(reverse_miss);
            if five > m {
                max_required = max_required.max(five.checked_add(l)?.checked_add(m)?);
            }
            if three > m {
                max_required = max_required.max(three.checked_add(l)?.checked_add(m)?);
            }
            Some((half_cycle, full_cycle, max_required))
        };
        let (half_cycle, full_cycle, max_required_bases) =
            bounds().ok_or(CoverageError::TemplateTooLong { transcript_len })?;

        // Offsets and requirements are combined as i64; keep the largest sum in range.
        let largest = full_cycle.max(max_required_bases);
        if largest.checked_mul(2).is_none_or(|v| i64::try_from(v).is_err()) {
            return Err(CoverageError::TemplateTooLong { transcript_len });
        }

        Ok(TemplateGeometry { transcript_len, half_cycle, full_cycle, max_required_bases })
    }

    /// Histogram length able to hold every required-bases value as an index.
    pub fn histogram_len(&self) -> usize {
        self.max_required_bases + 1
    }
}

/// PositionGrid — contiguous integer start offsets `start, start + 1, …`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionGrid {
    start: i64,
    len: usize,
}

impl PositionGrid {
    /// Grid `0..len`.
    pub fn from_zero(len: usize) -> Self {
        PositionGrid { start: 0, len }
    }

    /// Grid `start..start + len`, checked against a template geometry.
    ///
    /// # Errors
    /// [`CoverageError::GridTooShort`] if the grid starts after 0 or ends
    /// before `2 × half_cycle`.
    pub fn new(start: i64, len: usize, geometry: &TemplateGeometry) -> CoverageResult<Self> {
        let grid = PositionGrid { start, len };
        grid.check_covers(geometry)?;
        Ok(grid)
    }

    /// The default grid for a geometry: exactly one full cycle, `0..2h`.
    ///
    /// # Errors
    /// [`CoverageError::GridTooShort`] if the template has zero length.
    pub fn for_geometry(geometry: &TemplateGeometry) -> CoverageResult<Self> {
        Self::new(0, geometry.full_cycle, geometry)
    }

    /// Verify `start <= 0` and `end >= 2h` (and that the cycle is non-empty).
    pub fn check_covers(&self, geometry: &TemplateGeometry) -> CoverageResult<()> {
        let required = geometry.full_cycle as i64;
        if geometry.half_cycle == 0 || self.start > 0 || self.end() < required {
            return Err(CoverageError::GridTooShort { start: self.start, end: self.end(), required });
        }
        Ok(())
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    /// One past the last offset.
    pub fn end(&self) -> i64 {
        self.start + self.len as i64
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offsets as integers.
    pub fn offsets(&self) -> impl Iterator<Item = i64> + '_ {
        self.start..self.end()
    }

    /// Offsets as `f64`, for density evaluation and plotting.
    pub fn values(&self) -> Array1<f64> {
        Array1::from_iter(self.offsets().map(|x| x as f64))
    }

    /// Grid index of `offset`, if it lies on the grid.
    pub fn index_of(&self, offset: i64) -> Option<usize> {
        if offset >= self.start && offset < self.end() {
            Some((offset - self.start) as usize)
        } else {
            None
        }
    }
}
