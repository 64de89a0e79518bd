//! Serializable simulation output.
//!
//! The shape consumed by an external charting collaborator:
//! `{simulated_prices, transition_matrix}` as nested numeric arrays.
//! Values are validated to plain finite floats before leaving the core.

use serde::{Deserialize, Serialize};

use crate::engine::SimulationOutcome;
use crate::error::{CadenaError, Result};

/// Simulation output ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// One inner vector per simulation run, each of length `n_steps + 1`
    pub simulated_prices: Vec<Vec<f64>>,
    /// Row-stochastic transition matrix as nested rows
    pub transition_matrix: Vec<Vec<f64>>,
}

impl SimulationReport {
    /// Build a report from a simulation outcome.
    ///
    /// # Errors
    ///
    /// `NonFiniteOutput` if any price or probability is NaN or infinite,
    /// naming the offending entry.
    pub fn from_outcome(outcome: &SimulationOutcome) -> Result<Self> {
        let simulated_prices = outcome.simulated_prices();
        validate_finite(&simulated_prices, "simulated_prices")?;

        let transition_matrix = outcome.transition_matrix.to_rows();
        validate_finite(&transition_matrix, "transition_matrix")?;

        Ok(Self {
            simulated_prices,
            transition_matrix,
        })
    }

    /// Serialize the report to a JSON string.
    ///
    /// # Errors
    ///
    /// `Serialization` on encoder failure.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CadenaError::Serialization(e.to_string()))
    }
}

fn validate_finite(rows: &[Vec<f64>], name: &str) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            if !v.is_finite() {
                return Err(CadenaError::NonFiniteOutput {
                    context: format!("{name}[{i}][{j}] = {v}"),
                });
            }
        }
    }
    Ok(())
}
