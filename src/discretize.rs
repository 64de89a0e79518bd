//! Return discretization into Markov states.
//!
//! Maps a continuous return series to integer state labels in
//! `[0, n_states)` plus the cut points needed to map a state back to a
//! representative return. Two bucket policies are supported: equal numeric
//! range per bucket and equal population per bucket.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenaError, Result};
use crate::stats::percentile;

/// Bucket-boundary policy for discretizing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discretization {
    /// Divide `[min, max]` into buckets of equal numeric width.
    EqualWidth,
    /// Place cut points at empirical quantiles so each bucket receives
    /// approximately the same number of observations.
    EqualFreq,
}

impl Discretization {
    /// Wire name of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EqualWidth => "equal_width",
            Self::EqualFreq => "equal_freq",
        }
    }
}

impl FromStr for Discretization {
    type Err = CadenaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equal_width" => Ok(Self::EqualWidth),
            "equal_freq" => Ok(Self::EqualFreq),
            other => Err(CadenaError::invalid_parameter(
                "discretization_method",
                other,
                "one of: equal_width, equal_freq",
            )),
        }
    }
}

/// Result of discretizing a return series.
#[derive(Debug, Clone)]
pub struct Discretized {
    /// State label per return, each in `[0, n_states)`.
    pub labels: Vec<usize>,
    /// Strictly increasing cut points, length `n_states - 1`.
    pub boundaries: Vec<f64>,
}

/// Discretize returns into `n_states` buckets.
///
/// Labels follow a right-closed convention: a return exactly on a cut point
/// belongs to the bucket whose upper edge it is. Lower label means lower
/// return bucket.
///
/// Constant returns (zero range) cannot be bucketed by value; every label is
/// then assigned to the middle state `n_states / 2` and the cut points are
/// synthesized around the constant value so they stay strictly increasing.
///
/// # Errors
///
/// `InvalidParameter` when `n_states < 2` or `returns` is empty.
///
/// # Example
/// ```
/// use cadena::discretize::{discretize, Discretization};
///
/// let returns = vec![-0.02, -0.01, 0.0, 0.01, 0.02];
/// let disc = discretize(&returns, 2, Discretization::EqualWidth).unwrap();
/// assert_eq!(disc.labels, vec![0, 0, 0, 1, 1]);
/// assert_eq!(disc.boundaries.len(), 1);
/// ```
pub fn discretize(
    returns: &[f64],
    n_states: usize,
    method: Discretization,
) -> Result<Discretized> {
    if n_states < 2 {
        return Err(CadenaError::invalid_parameter(
            "n_states",
            n_states,
            "at least 2",
        ));
    }
    if returns.is_empty() {
        return Err(CadenaError::invalid_parameter(
            "returns",
            "[]",
            "a non-empty return series",
        ));
    }

    let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return Ok(constant_fallback(returns.len(), n_states, min));
    }

    let boundaries = match method {
        Discretization::EqualWidth => {
            let width = (max - min) / n_states as f64;
            (1..n_states).map(|k| min + k as f64 * width).collect()
        }
        Discretization::EqualFreq => {
            let mut cuts: Vec<f64> = (1..n_states)
                .map(|k| percentile(returns, k as f64 / n_states as f64))
                .collect();
            enforce_strictly_increasing(&mut cuts);
            cuts
        }
    };

    let labels = returns
        .iter()
        .map(|&r| assign_state(r, &boundaries))
        .collect();

    Ok(Discretized { labels, boundaries })
}

/// Assign a single return to its bucket given strictly increasing cut points.
#[inline]
fn assign_state(r: f64, boundaries: &[f64]) -> usize {
    boundaries.partition_point(|&b| b < r)
}

/// All returns identical: label everything as the middle state and invent
/// cut points around the constant value so the boundary invariant holds.
fn constant_fallback(n_returns: usize, n_states: usize, value: f64) -> Discretized {
    let middle = n_states / 2;
    let eps = 1e-6 * value.abs().max(1.0);
    let half = n_states as f64 / 2.0;
    let boundaries = (1..n_states)
        .map(|k| value + (k as f64 - half) * eps)
        .collect();

    Discretized {
        labels: vec![middle; n_returns],
        boundaries,
    }
}

/// Quantile cut points can tie when the sample is heavily repeated; nudge
/// duplicates upward so downstream code can rely on strict monotonicity.
fn enforce_strictly_increasing(cuts: &mut [f64]) {
    for i in 1..cuts.len() {
        let floor = cuts[i - 1];
        if cuts[i] <= floor {
            cuts[i] = floor + 1e-12 * floor.abs().max(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "equal_width".parse::<Discretization>().unwrap(),
            Discretization::EqualWidth
        );
        assert_eq!(
            "equal_freq".parse::<Discretization>().unwrap(),
            Discretization::EqualFreq
        );
        assert!("nearest_rank".parse::<Discretization>().is_err());
    }

    #[test]
    fn test_method_wire_name_round_trips() {
        for method in [Discretization::EqualWidth, Discretization::EqualFreq] {
            assert_eq!(method.as_str().parse::<Discretization>().unwrap(), method);
        }
    }

    #[test]
    fn test_rejects_small_n_states() {
        let err = discretize(&[0.1, 0.2], 1, Discretization::EqualWidth).unwrap_err();
        assert!(matches!(err, CadenaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_empty_returns() {
        assert!(discretize(&[], 3, Discretization::EqualFreq).is_err());
    }

    #[test]
    fn test_equal_width_two_states_exact_boundary() {
        // Returns of [100, 102, 101, 105, 103, 107]
        let returns = vec![
            0.02,
            (101.0 - 102.0) / 102.0,
            (105.0 - 101.0) / 101.0,
            (103.0 - 105.0) / 105.0,
            (107.0 - 103.0) / 103.0,
        ];
        let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let disc = discretize(&returns, 2, Discretization::EqualWidth).unwrap();

        assert_eq!(disc.boundaries.len(), 1);
        assert!((disc.boundaries[0] - (min + (max - min) / 2.0)).abs() < 1e-12);
        assert_eq!(disc.labels, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_equal_freq_balances_buckets() {
        let returns: Vec<f64> = (0..90).map(|i| f64::from(i) / 1000.0).collect();
        let disc = discretize(&returns, 3, Discretization::EqualFreq).unwrap();

        let mut counts = [0usize; 3];
        for &l in &disc.labels {
            counts[l] += 1;
        }
        for count in counts {
            assert!(
                (29..=31).contains(&count),
                "bucket should hold about a third: {count}"
            );
        }
    }

    #[test]
    fn test_constant_returns_use_middle_state() {
        let disc = discretize(&[0.0, 0.0, 0.0], 3, Discretization::EqualWidth).unwrap();
        assert_eq!(disc.labels, vec![1, 1, 1]);
        assert_eq!(disc.boundaries.len(), 2);
        assert!(disc.boundaries[0] < disc.boundaries[1]);

        // Equal frequency hits the same fallback.
        let disc = discretize(&[0.01; 5], 4, Discretization::EqualFreq).unwrap();
        assert_eq!(disc.labels, vec![2; 5]);
    }

    #[test]
    fn test_labels_ordered_by_return_magnitude() {
        let returns = vec![-0.05, -0.01, 0.0, 0.02, 0.06];
        let disc = discretize(&returns, 5, Discretization::EqualFreq).unwrap();
        for w in disc.labels.windows(2) {
            assert!(w[0] <= w[1], "sorted returns must give sorted labels");
        }
    }

    #[test]
    fn test_heavy_ties_keep_boundaries_strict() {
        let returns = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05];
        let disc = discretize(&returns, 4, Discretization::EqualFreq).unwrap();
        for w in disc.boundaries.windows(2) {
            assert!(w[0] < w[1], "boundaries must be strictly increasing");
        }
    }

    #[test]
    fn test_extremes_map_to_extreme_states() {
        let returns = vec![-0.1, -0.02, 0.0, 0.03, 0.1];
        for method in [Discretization::EqualWidth, Discretization::EqualFreq] {
            let disc = discretize(&returns, 3, method).unwrap();
            assert_eq!(disc.labels[0], 0);
            assert_eq!(disc.labels[4], 2);
        }
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_labels_in_range(
                returns in prop::collection::vec(-0.5..0.5f64, 1..200),
                n_states in 2usize..10,
            ) {
                for method in [Discretization::EqualWidth, Discretization::EqualFreq] {
                    let disc = discretize(&returns, n_states, method).unwrap();
                    prop_assert_eq!(disc.labels.len(), returns.len());
                    for &l in &disc.labels {
                        prop_assert!(l < n_states);
                    }
                }
            }

            #[test]
            fn prop_boundaries_strictly_increasing(
                returns in prop::collection::vec(-0.5..0.5f64, 1..200),
                n_states in 2usize..10,
            ) {
                for method in [Discretization::EqualWidth, Discretization::EqualFreq] {
                    let disc = discretize(&returns, n_states, method).unwrap();
                    prop_assert_eq!(disc.boundaries.len(), n_states - 1);
                    for w in disc.boundaries.windows(2) {
                        prop_assert!(w[0] < w[1]);
                    }
                }
            }
        }
    }
}
