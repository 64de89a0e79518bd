//! Transition probability estimation.
//!
//! Counts observed state-to-state transitions and normalizes the counts
//! into a row-stochastic matrix.

use serde::{Deserialize, Serialize};

use crate::error::{CadenaError, Result};

/// Row-stochastic transition probability matrix.
///
/// `get(i, j)` is the probability of moving from state `i` to state `j`.
/// Every row sums to 1.0 within floating-point tolerance: rows for states
/// never observed as a source fall back to the uniform distribution so the
/// matrix is always usable by the sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    n_states: usize,
    /// Row-major probabilities, `n_states * n_states` entries.
    probs: Vec<f64>,
}

impl TransitionMatrix {
    /// Estimate the matrix from a label sequence.
    ///
    /// Counts `(labels[i], labels[i + 1])` pairs and normalizes each row by
    /// its total. Zero-count rows become uniform (`1 / n_states` each).
    ///
    /// Labels must already lie in `[0, n_states)`, as produced by
    /// [`crate::discretize::discretize`].
    ///
    /// # Example
    /// ```
    /// use cadena::transition::TransitionMatrix;
    ///
    /// let matrix = TransitionMatrix::estimate(&[0, 1, 2, 1, 0, 1], 3);
    /// assert!(matrix.is_row_stochastic(1e-9));
    /// assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn estimate(labels: &[usize], n_states: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < n_states));

        let mut counts = vec![0.0f64; n_states * n_states];
        for pair in labels.windows(2) {
            counts[pair[0] * n_states + pair[1]] += 1.0;
        }

        for row in counts.chunks_mut(n_states) {
            let total: f64 = row.iter().sum();
            if total > 0.0 {
                for p in row {
                    *p /= total;
                }
            } else {
                // Unobserved source state: uniform fallback.
                row.fill(1.0 / n_states as f64);
            }
        }

        Self {
            n_states,
            probs: counts,
        }
    }

    /// Build a matrix from explicit probability rows.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the rows are not square with at least two
    /// states, or a row does not sum to 1.0 within `1e-9`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_states = rows.len();
        if n_states < 2 || rows.iter().any(|r| r.len() != n_states) {
            return Err(CadenaError::invalid_parameter(
                "transition_matrix",
                format!("{n_states} rows"),
                "a square matrix with at least 2 states",
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > 1e-9 || row.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
                return Err(CadenaError::invalid_parameter(
                    "transition_matrix",
                    format!("row {i} sums to {sum}"),
                    "rows of probabilities summing to 1.0",
                ));
            }
        }

        Ok(Self {
            n_states,
            probs: rows.concat(),
        })
    }

    /// Number of states.
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Probability of moving from state `i` to state `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.probs[i * self.n_states + j]
    }

    /// Probability row for source state `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.probs[i * self.n_states..(i + 1) * self.n_states]
    }

    /// Matrix as nested rows, for serialization toward charting clients.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.probs.chunks(self.n_states).map(<[f64]>::to_vec).collect()
    }

    /// Check that every row sums to 1.0 within `tol`.
    #[must_use]
    pub fn is_row_stochastic(&self, tol: f64) -> bool {
        self.probs
            .chunks(self.n_states)
            .all(|row| (row.iter().sum::<f64>() - 1.0).abs() <= tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_counts_and_normalizes() {
        // Transitions: 0->1, 1->2, 2->1, 1->0, 0->1
        let matrix = TransitionMatrix::estimate(&[0, 1, 2, 1, 0, 1], 3);

        assert_eq!(matrix.n_states(), 3);
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((matrix.get(1, 0) - 0.5).abs() < 1e-12);
        assert!((matrix.get(1, 2) - 0.5).abs() < 1e-12);
        assert!((matrix.get(2, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_sum_to_one() {
        let matrix = TransitionMatrix::estimate(&[0, 1, 2, 1, 0, 1], 3);
        assert!(matrix.is_row_stochastic(1e-9));
    }

    #[test]
    fn test_unobserved_source_becomes_uniform() {
        // State 2 never appears as a source.
        let matrix = TransitionMatrix::estimate(&[0, 1, 0, 1], 3);
        for j in 0..3 {
            assert!((matrix.get(2, j) - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!(matrix.is_row_stochastic(1e-9));
    }

    #[test]
    fn test_final_only_state_becomes_uniform() {
        // State 2 appears only as the final label, so it has no outgoing
        // observations.
        let matrix = TransitionMatrix::estimate(&[0, 1, 2], 3);
        for j in 0..3 {
            assert!((matrix.get(2, j) - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_label_gives_all_uniform() {
        let matrix = TransitionMatrix::estimate(&[1], 2);
        assert!(matrix.is_row_stochastic(1e-9));
        assert!((matrix.get(0, 0) - 0.5).abs() < 1e-12);
        assert!((matrix.get(1, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_rows_valid() {
        let matrix =
            TransitionMatrix::from_rows(&[vec![0.9, 0.1], vec![0.4, 0.6]]).unwrap();
        assert!((matrix.get(0, 0) - 0.9).abs() < 1e-12);
        assert_eq!(matrix.row(1), &[0.4, 0.6]);
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        assert!(TransitionMatrix::from_rows(&[vec![1.0]]).is_err());
        assert!(TransitionMatrix::from_rows(&[vec![0.5, 0.5], vec![1.0]]).is_err());
    }

    #[test]
    fn test_from_rows_rejects_non_stochastic() {
        assert!(TransitionMatrix::from_rows(&[vec![0.9, 0.2], vec![0.5, 0.5]]).is_err());
    }

    #[test]
    fn test_to_rows_round_trip() {
        let matrix = TransitionMatrix::estimate(&[0, 1, 1, 0], 2);
        let rows = matrix.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert!((rows[0][1] - matrix.get(0, 1)).abs() < 1e-12);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_rows_always_stochastic(
                n_states in 2usize..10,
                raw in prop::collection::vec(0usize..100, 1..300),
            ) {
                let labels: Vec<usize> = raw.iter().map(|&x| x % n_states).collect();
                let matrix = TransitionMatrix::estimate(&labels, n_states);
                prop_assert!(matrix.is_row_stochastic(1e-9));
            }

            #[test]
            fn prop_probabilities_in_unit_interval(
                n_states in 2usize..8,
                raw in prop::collection::vec(0usize..100, 2..200),
            ) {
                let labels: Vec<usize> = raw.iter().map(|&x| x % n_states).collect();
                let matrix = TransitionMatrix::estimate(&labels, n_states);
                for i in 0..n_states {
                    for j in 0..n_states {
                        let p = matrix.get(i, j);
                        prop_assert!((0.0..=1.0).contains(&p));
                    }
                }
            }
        }
    }
}
