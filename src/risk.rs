//! Risk analysis of a historical price series.
//!
//! Annualized volatility, historical VaR and CVaR, Sharpe ratio, and
//! maximum drawdown, computed from log returns.

use serde::{Deserialize, Serialize};

use crate::error::{CadenaError, Result};
use crate::series::log_returns;
use crate::stats::percentile;

/// Trading days per year, used for annualization.
const TRADING_DAYS: f64 = 252.0;

/// Rolling window for volatility, in observations.
const VOLATILITY_WINDOW: usize = 30;

/// Risk metrics for a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    /// Annualized rolling volatility over the most recent window
    pub volatility: f64,
    /// Historical Value at Risk at 95% confidence (5th percentile return)
    pub var_95: f64,
    /// Conditional VaR: mean of returns at or below `var_95`
    pub cvar_95: f64,
    /// Annualized Sharpe ratio with zero risk-free rate
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough decline, as a negative fraction
    pub max_drawdown: f64,
}

/// Perform risk analysis on a price series.
///
/// Volatility uses the last [`VOLATILITY_WINDOW`] log returns (or all of
/// them when fewer are available), annualized by the square root of 252.
///
/// # Errors
///
/// `InsufficientData` with fewer than three prices; `InvalidParameter` for
/// non-positive or non-finite prices.
///
/// # Example
/// ```
/// use cadena::risk::analyze;
///
/// let prices = vec![100.0, 102.0, 99.0, 101.0, 103.0, 102.0, 105.0];
/// let summary = analyze(&prices).unwrap();
/// assert!(summary.volatility > 0.0);
/// assert!(summary.max_drawdown <= 0.0);
/// ```
pub fn analyze(prices: &[f64]) -> Result<RiskSummary> {
    if prices.len() < 3 {
        return Err(CadenaError::InsufficientData {
            required: 3,
            actual: prices.len(),
        });
    }

    let returns = log_returns(prices)?;

    let window = &returns[returns.len().saturating_sub(VOLATILITY_WINDOW)..];
    let volatility = sample_std(window) * TRADING_DAYS.sqrt();

    let var_95 = percentile(&returns, 0.05);
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var_95).collect();
    let cvar_95 = tail.iter().sum::<f64>() / tail.len() as f64;

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let std = sample_std(&returns);
    let sharpe_ratio = if std > 1e-12 {
        (mean * TRADING_DAYS) / (std * TRADING_DAYS.sqrt())
    } else {
        0.0
    };

    Ok(RiskSummary {
        volatility,
        var_95,
        cvar_95,
        sharpe_ratio,
        max_drawdown: max_drawdown(prices),
    })
}

/// Largest peak-to-trough decline: `min(price / running_max - 1)`.
///
/// Zero for a series that never falls below its running maximum.
#[must_use]
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let mut worst = 0.0f64;
    let mut peak = f64::NEG_INFINITY;
    for &p in prices {
        if p > peak {
            peak = p;
        }
        worst = worst.min(p / peak - 1.0);
    }
    worst
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
