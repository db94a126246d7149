//! model::fraction — probability that both UTRs are covered.

use crate::model::{errors::CoverageResult, validation::validate_same_len};
use ndarray::Array1;

/// `Σ histogram[i] × survival[i]`.
///
/// `histogram` is the bases-to-go mass, `survival[i]` the probability of
/// reading at least `i` bases. Both must be on the same required-bases grid;
/// slice the survival complement to the histogram length first.
///
/// # Errors
/// [`CoverageError::LengthMismatch`](crate::model::errors::CoverageError::LengthMismatch)
/// if the lengths differ.
pub fn covered_fraction(histogram: &Array1<f64>, survival: &Array1<f64>) -> CoverageResult<f64> {
    validate_same_len(histogram.len(), survival.len())?;
    Ok(histogram.dot(survival))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::errors::CoverageError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify the weighted sum on a tiny hand-computed example.
    //
    // Given
    // -----
    // - histogram [0, 0.5, 0.5], survival [1, 0.8, 0.2].
    //
    // Expect
    // ------
    // - 0.5 × 0.8 + 0.5 × 0.2 = 0.5.
    fn weighted_sum_matches_hand_computation() {
        // Act
        let f = covered_fraction(&array![0.0, 0.5, 0.5], &array![1.0, 0.8, 0.2])
            .expect("equal lengths");

        // Assert
        assert_abs_diff_eq!(f, 0.5, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Ensure unsliced survival arrays are rejected.
    //
    // Expect
    // ------
    // - `LengthMismatch { expected: 2, actual: 3 }`.
    fn unsliced_survival_is_rejected() {
        // Act
        let result = covered_fraction(&array![0.5, 0.5], &array![1.0, 0.5, 0.0]);

        // Assert
        assert_eq!(result, Err(CoverageError::LengthMismatch { expected: 2, actual: 3 }));
    }
}
