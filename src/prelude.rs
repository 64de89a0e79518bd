//! Common imports.

pub use crate::compare::{compare_state_counts, ModelComparison};
pub use crate::discretize::{discretize, Discretization, Discretized};
pub use crate::engine::{MarkovSimulation, PathMetadata, PricePath, SimulationOutcome};
pub use crate::error::{CadenaError, Result};
pub use crate::reconstruct::{reconstruct, representative_returns};
pub use crate::report::SimulationReport;
pub use crate::risk::{analyze, max_drawdown, RiskSummary};
pub use crate::sampler::{sample_path, ChainRng};
pub use crate::series::{log_returns, simple_returns};
pub use crate::stats::{percentile, Statistics};
pub use crate::transition::TransitionMatrix;
