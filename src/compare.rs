//! Model comparison across state counts.
//!
//! Fits and simulates the Markov model for several candidate `n_states`
//! values and reports the moments of a representative simulated path, so a
//! caller can judge how state granularity shapes the return distribution.

use serde::{Deserialize, Serialize};

use crate::engine::MarkovSimulation;
use crate::error::{CadenaError, Result};
use crate::stats::Statistics;

/// Moments of one model's simulated log returns plus its fitted matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    /// Number of discrete states the model was fitted with
    pub n_states: usize,
    /// Mean simulated log return
    pub mean: f64,
    /// Standard deviation of simulated log returns
    pub std: f64,
    /// Skewness of simulated log returns
    pub skewness: f64,
    /// Excess kurtosis of simulated log returns
    pub kurtosis: f64,
    /// Fitted transition matrix as nested rows
    pub transition_matrix: Vec<Vec<f64>>,
}

/// Compare Markov models fitted with different numbers of states.
///
/// For each `n_states`, the full pipeline runs with the shared seed and the
/// log returns of the first simulated path are summarized.
///
/// # Errors
///
/// `InvalidParameter` when `n_states_list` is empty or any entry (or the
/// shared simulation parameters) is out of range; `InsufficientData` when
/// the price series is too short for the largest state count.
pub fn compare_state_counts(
    prices: &[f64],
    n_states_list: &[usize],
    n_simulations: usize,
    n_steps: usize,
    seed: u64,
) -> Result<Vec<ModelComparison>> {
    if n_states_list.is_empty() {
        return Err(CadenaError::invalid_parameter(
            "n_states_list",
            "[]",
            "at least one state count",
        ));
    }

    let mut results = Vec::with_capacity(n_states_list.len());
    for &n_states in n_states_list {
        let outcome = MarkovSimulation::new(seed)
            .with_n_simulations(n_simulations)
            .with_n_steps(n_steps)
            .with_n_states(n_states)
            .run(prices)?;

        let path = &outcome.paths[0].values;
        let log_returns: Vec<f64> = path.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        let stats = Statistics::from_values(&log_returns);

        results.push(ModelComparison {
            n_states,
            mean: stats.mean,
            std: stats.std,
            skewness: stats.skewness,
            kurtosis: stats.kurtosis,
            transition_matrix: outcome.transition_matrix.to_rows(),
        });
    }

    Ok(results)
}
