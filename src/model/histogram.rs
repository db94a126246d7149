//! model::histogram — bases-to-go distribution by scatter-add.
//!
//! Accumulates start-position mass into a histogram indexed by the number of
//! bases still required. Several start offsets can require the same number of
//! bases, so contributions are summed. Every index is bounds-checked before
//! the write; the accumulator is never resized or wrapped.

use crate::model::{
    errors::{CoverageError, CoverageResult},
    validation::validate_same_len,
};
use ndarray::Array1;

/// Scatter-add `start_mass[i]` into `histogram[required[i]]`.
///
/// Parameters
/// ----------
/// - `start_mass`: start-position mass on the position grid.
/// - `required`: required bases on the same grid.
/// - `len`: histogram length; use
///   [`TemplateGeometry::histogram_len`](crate::model::geometry::TemplateGeometry::histogram_len)
///   to size it from the analytical bound.
///
/// Returns
/// -------
/// Histogram of length `len` whose total equals `start_mass.sum()`.
///
/// Errors
/// ------
/// - [`CoverageError::LengthMismatch`] if the two inputs differ in length.
/// - [`CoverageError::RequiredBasesOutOfRange`] for the first index that
///   does not fit; nothing is returned in that case.
pub fn bases_to_go_histogram(
    start_mass: &Array1<f64>, required: &Array1<usize>, len: usize,
) -> CoverageResult<Array1<f64>> {
    validate_same_len(start_mass.len(), required.len())?;
    if let Some((index, &value)) = required.iter().enumerate().find(|&(_, &v)| v >= len) {
        return Err(CoverageError::RequiredBasesOutOfRange { index, value, len });
    }

    let mut histogram = Array1::<f64>::zeros(len);
    for (&mass, &bases) in start_mass.iter().zip(required.iter()) {
        histogram[bases] += mass;
    }
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify colliding indices sum and total mass is preserved.
    //
    // Given
    // -----
    // - mass [0.1, 0.2, 0.3, 0.4], required [2, 0, 2, 3], len 5.
    //
    // Expect
    // ------
    // - histogram [0.2, 0, 0.4, 0.4, 0], total 1.
    fn colliding_indices_accumulate() {
        // Arrange
        let mass = array![0.1, 0.2, 0.3, 0.4];
        let required = array![2_usize, 0, 2, 3];

        // Act
        let hist = bases_to_go_histogram(&mass, &required, 5).expect("all indices fit");

        // Assert
        assert_abs_diff_eq!(hist[0], 0.2, epsilon = 1e-15);
        assert_eq!(hist[1], 0.0);
        assert_abs_diff_eq!(hist[2], 0.4, epsilon = 1e-15);
        assert_abs_diff_eq!(hist[3], 0.4, epsilon = 1e-15);
        assert_eq!(hist[4], 0.0);
        assert_abs_diff_eq!(hist.sum(), mass.sum(), epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an index past the end is rejected rather than truncated.
    //
    // Given
    // -----
    // - required [1, 5] with len 5.
    //
    // Expect
    // ------
    // - `RequiredBasesOutOfRange { index: 1, value: 5, len: 5 }`.
    fn out_of_range_index_is_rejected() {
        // Arrange
        let mass = array![0.5, 0.5];
        let required = array![1_usize, 5];

        // Act
        let result = bases_to_go_histogram(&mass, &required, 5);

        // Assert
        assert_eq!(
            result,
            Err(CoverageError::RequiredBasesOutOfRange { index: 1, value: 5, len: 5 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check mismatched input lengths.
    //
    // Expect
    // ------
    // - `LengthMismatch { expected: 2, actual: 1 }`.
    fn mismatched_lengths_are_rejected() {
        // Act
        let result = bases_to_go_histogram(&array![0.5, 0.5], &array![1_usize], 4);

        // Assert
        assert_eq!(result, Err(CoverageError::LengthMismatch { expected: 2, actual: 1 }));
    }
}
