//! Simulation orchestrator.
//!
//! Drives the end-to-end pipeline: returns -> discretization -> transition
//! estimation -> N independent sampled paths reconstructed into prices.
//! Runs are embarrassingly parallel and executed on a rayon thread pool;
//! per-path RNG streams keep the result identical to a sequential run.

use rayon::prelude::*;

use crate::discretize::{discretize, Discretization};
use crate::error::{CadenaError, Result};
use crate::reconstruct::reconstruct;
use crate::sampler::{sample_path, ChainRng};
use crate::series::simple_returns;
use crate::stats::Statistics;
use crate::transition::TransitionMatrix;

/// Parameter bounds enforced before any computation.
const MAX_SIMULATIONS: usize = 10_000;
const MAX_STEPS: usize = 252;
const MIN_STATES: usize = 2;
const MAX_STATES: usize = 10;

/// Metadata for a single simulated price path.
#[derive(Debug, Clone, Copy)]
pub struct PathMetadata {
    /// Index of this path within the simulation batch
    pub path_id: usize,
    /// Seed shared by the whole batch
    pub seed: u64,
    /// RNG stream that generated this path
    pub stream: u64,
}

/// One realization of a simulated price trajectory.
#[derive(Debug, Clone)]
pub struct PricePath {
    /// Simulated prices, starting at the last observed real price
    pub values: Vec<f64>,
    /// Metadata about this path
    pub metadata: PathMetadata,
}

impl PricePath {
    /// Final simulated price.
    #[must_use]
    pub fn final_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Total return over the simulated horizon.
    #[must_use]
    pub fn total_return(&self) -> Option<f64> {
        let initial = self.values.first().copied()?;
        let final_val = self.final_value()?;
        (initial > 0.0).then(|| (final_val - initial) / initial)
    }
}

/// Markov chain Monte Carlo price simulation, configured builder-style.
///
/// # Example
/// ```
/// use cadena::engine::MarkovSimulation;
/// use cadena::discretize::Discretization;
///
/// let prices = vec![100.0, 102.0, 99.0, 101.0, 103.0, 102.0, 105.0, 107.0];
/// let outcome = MarkovSimulation::new(42)
///     .with_n_simulations(100)
///     .with_n_steps(30)
///     .with_n_states(3)
///     .with_discretization(Discretization::EqualFreq)
///     .run(&prices)
///     .unwrap();
///
/// assert_eq!(outcome.n_paths(), 100);
/// assert!(outcome.transition_matrix.is_row_stochastic(1e-9));
/// ```
#[derive(Debug, Clone)]
pub struct MarkovSimulation {
    seed: u64,
    n_simulations: usize,
    n_steps: usize,
    n_states: usize,
    method: Discretization,
}

impl MarkovSimulation {
    /// Create a simulation with the given seed and default parameters
    /// (1000 runs, 30 steps, 3 states, equal-frequency buckets).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            n_simulations: 1000,
            n_steps: 30,
            n_states: 3,
            method: Discretization::EqualFreq,
        }
    }

    /// Set the number of independent simulation runs.
    #[must_use]
    pub fn with_n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = n_simulations;
        self
    }

    /// Set the number of forward steps per run.
    #[must_use]
    pub fn with_n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Set the number of discrete states.
    #[must_use]
    pub fn with_n_states(mut self, n_states: usize) -> Self {
        self.n_states = n_states;
        self
    }

    /// Set the bucket-boundary policy.
    #[must_use]
    pub fn with_discretization(mut self, method: Discretization) -> Self {
        self.method = method;
        self
    }

    /// Run the full pipeline against a historical price series.
    ///
    /// The start state is the discretized label of the most recent observed
    /// return; every path is seeded from the last real price. Each run draws
    /// from its own RNG stream, so runs share nothing but the fitted
    /// transition matrix and boundaries.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for out-of-range `n_simulations` (1..=10000),
    /// `n_steps` (1..=252), or `n_states` (2..=10); `InsufficientData` when
    /// `prices.len() < n_states + 2`.
    pub fn run(&self, prices: &[f64]) -> Result<SimulationOutcome> {
        self.validate()?;

        let required = self.n_states + 2;
        if prices.len() < required {
            return Err(CadenaError::InsufficientData {
                required,
                actual: prices.len(),
            });
        }

        let returns = simple_returns(prices)?;
        let disc = discretize(&returns, self.n_states, self.method)?;
        let matrix = TransitionMatrix::estimate(&disc.labels, self.n_states);

        let start_state = disc.labels[disc.labels.len() - 1];
        let last_price = prices[prices.len() - 1];

        let paths: Vec<PricePath> = (0..self.n_simulations)
            .into_par_iter()
            .map(|path_id| {
                // Stream ids start at 1; stream 0 is left for callers that
                // sample against the fitted matrix themselves.
                let stream = path_id as u64 + 1;
                let mut rng = ChainRng::with_stream(self.seed, stream);
                let states = sample_path(&matrix, start_state, self.n_steps, &mut rng);
                let values = reconstruct(&states, &disc.boundaries, last_price);
                PricePath {
                    values,
                    metadata: PathMetadata {
                        path_id,
                        seed: self.seed,
                        stream,
                    },
                }
            })
            .collect();

        Ok(SimulationOutcome {
            paths,
            transition_matrix: matrix,
            boundaries: disc.boundaries,
            start_state,
            seed: self.seed,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(CadenaError::invalid_parameter(
                "n_simulations",
                self.n_simulations,
                "1..=10000",
            ));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(CadenaError::invalid_parameter(
                "n_steps",
                self.n_steps,
                "1..=252",
            ));
        }
        if self.n_states < MIN_STATES || self.n_states > MAX_STATES {
            return Err(CadenaError::invalid_parameter(
                "n_states",
                self.n_states,
                "2..=10",
            ));
        }
        Ok(())
    }
}

/// Result of a simulation batch: the sampled paths plus the fitted model.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// One price path per simulation run, each of length `n_steps + 1`
    pub paths: Vec<PricePath>,
    /// Fitted transition matrix (shared, read-only model)
    pub transition_matrix: TransitionMatrix,
    /// Bucket boundaries used for discretization
    pub boundaries: Vec<f64>,
    /// State of the most recent observed return
    pub start_state: usize,
    /// Seed of the batch
    pub seed: u64,
}

impl SimulationOutcome {
    /// Number of simulated paths.
    #[must_use]
    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }

    /// Price paths as nested vectors, for serialization.
    #[must_use]
    pub fn simulated_prices(&self) -> Vec<Vec<f64>> {
        self.paths.iter().map(|p| p.values.clone()).collect()
    }

    /// Summary statistics of the final simulated prices.
    #[must_use]
    pub fn final_value_statistics(&self) -> Statistics {
        let finals: Vec<f64> = self.paths.iter().filter_map(PricePath::final_value).collect();
        Statistics::from_values(&finals)
    }
}
