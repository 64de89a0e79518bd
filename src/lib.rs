//! Cadena: discrete-state Markov chain modeling and Monte Carlo price
//! simulation for financial time series.
//!
//! Cadena converts a historical price series into a finite set of discrete
//! return states, estimates a row-stochastic transition matrix from observed
//! state transitions, and samples forward price trajectories from that
//! matrix. Randomness is explicit and seedable, so every simulation batch is
//! reproducible, and the independent runs execute on a rayon thread pool.
//!
//! # Quick Start
//!
//! ```
//! use cadena::prelude::*;
//!
//! let prices = vec![100.0, 102.0, 99.0, 101.0, 103.0, 102.0, 105.0, 107.0];
//!
//! let outcome = MarkovSimulation::new(42)
//!     .with_n_simulations(500)
//!     .with_n_steps(30)
//!     .with_n_states(3)
//!     .with_discretization(Discretization::EqualFreq)
//!     .run(&prices)
//!     .unwrap();
//!
//! assert_eq!(outcome.n_paths(), 500);
//! assert!(outcome.transition_matrix.is_row_stochastic(1e-9));
//!
//! // Serializable shape for a charting client, validated to finite floats.
//! let report = SimulationReport::from_outcome(&outcome).unwrap();
//! assert_eq!(report.simulated_prices.len(), 500);
//! ```
//!
//! # Modules
//!
//! - [`series`]: return computation from prices
//! - [`discretize`]: equal-width / equal-frequency state discretization
//! - [`transition`]: transition probability estimation
//! - [`sampler`]: seeded Markov chain sampling
//! - [`reconstruct`]: state paths back to price paths
//! - [`engine`]: end-to-end simulation orchestration
//! - [`report`]: serializable, finiteness-validated output
//! - [`risk`]: volatility, VaR, CVaR, Sharpe, drawdown
//! - [`compare`]: model comparison across state counts
//! - [`stats`]: shared descriptive statistics

pub mod compare;
pub mod discretize;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod reconstruct;
pub mod report;
pub mod risk;
pub mod sampler;
pub mod series;
pub mod stats;
pub mod transition;
