//! Price path reconstruction from sampled state sequences.
//!
//! Maps each state back to a representative return derived from the bucket
//! boundaries, then compounds those returns multiplicatively from the last
//! observed price.

/// Returns below this floor are clamped so prices stay strictly positive.
/// A modeling approximation: an open-ended bottom bucket can extrapolate to
/// a representative return at or below -100%, which no price can realize.
pub const RETURN_FLOOR: f64 = -0.99;

/// Bucket width assumed for the open-ended buckets when a single boundary
/// leaves no closed bucket to measure.
const FALLBACK_BUCKET_WIDTH: f64 = 0.01;

/// Representative return per state, derived from bucket boundaries.
///
/// Interior states use the midpoint of their bucket. The open-ended first
/// and last buckets extrapolate by the width of the nearest closed bucket
/// (or [`FALLBACK_BUCKET_WIDTH`] when only one boundary exists). All values
/// are clamped to [`RETURN_FLOOR`].
///
/// # Example
/// ```
/// use cadena::reconstruct::representative_returns;
///
/// let reps = representative_returns(&[-0.01, 0.01]);
/// assert_eq!(reps.len(), 3);
/// assert!((reps[1] - 0.0).abs() < 1e-12); // midpoint of (-0.01, 0.01]
/// ```
#[must_use]
pub fn representative_returns(boundaries: &[f64]) -> Vec<f64> {
    let n_states = boundaries.len() + 1;
    if boundaries.is_empty() {
        return vec![0.0];
    }

    let edge_width = if boundaries.len() >= 2 {
        boundaries[1] - boundaries[0]
    } else {
        FALLBACK_BUCKET_WIDTH
    };
    let last_width = if boundaries.len() >= 2 {
        boundaries[boundaries.len() - 1] - boundaries[boundaries.len() - 2]
    } else {
        FALLBACK_BUCKET_WIDTH
    };

    (0..n_states)
        .map(|state| {
            let rep = if state == 0 {
                boundaries[0] - edge_width / 2.0
            } else if state == n_states - 1 {
                boundaries[n_states - 2] + last_width / 2.0
            } else {
                (boundaries[state - 1] + boundaries[state]) / 2.0
            };
            rep.max(RETURN_FLOOR)
        })
        .collect()
}

/// Reconstruct a simulated price path from a sampled state sequence.
///
/// Each transition `state_path[i] -> state_path[i + 1]` applies the
/// representative return of the state being entered:
/// `price[i + 1] = price[i] * (1 + rep[state_path[i + 1]])`.
///
/// The output has the same length as `state_path` and starts at
/// `last_price`. For positive `last_price` the result is strictly positive
/// because representative returns are clamped to [`RETURN_FLOOR`].
#[must_use]
pub fn reconstruct(state_path: &[usize], boundaries: &[f64], last_price: f64) -> Vec<f64> {
    if state_path.is_empty() {
        return Vec::new();
    }

    let reps = representative_returns(boundaries);
    debug_assert!(state_path.iter().all(|&s| s < reps.len()));

    let mut prices = Vec::with_capacity(state_path.len());
    let mut price = last_price;
    prices.push(price);

    for &state in &state_path[1..] {
        price *= 1.0 + reps[state];
        prices.push(price);
    }

    prices
}
