//! Return computation from price series.
//!
//! Simple returns drive the Markov pipeline; log returns are used by risk
//! analysis and model comparison.

use crate::error::{CadenaError, Result};

/// Calculate simple period returns from a price series.
///
/// `returns[i] = (prices[i + 1] - prices[i]) / prices[i]`, so the result is
/// one element shorter than the input.
///
/// # Errors
///
/// `InsufficientData` with fewer than two prices; `InvalidParameter` if any
/// price is non-positive or non-finite.
///
/// # Example
/// ```
/// use cadena::series::simple_returns;
///
/// let returns = simple_returns(&[100.0, 110.0, 99.0]).unwrap();
/// assert!((returns[0] - 0.10).abs() < 1e-12);
/// assert!((returns[1] + 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(prices: &[f64]) -> Result<Vec<f64>> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
}

/// Calculate log returns from a price series.
///
/// `returns[i] = ln(prices[i + 1] / prices[i])`.
///
/// # Errors
///
/// Same conditions as [`simple_returns`].
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

fn validate_prices(prices: &[f64]) -> Result<()> {
    if prices.len() < 2 {
        return Err(CadenaError::InsufficientData {
            required: 2,
            actual: prices.len(),
        });
    }
    for &p in prices {
        if !p.is_finite() || p <= 0.0 {
            return Err(CadenaError::invalid_parameter(
                "prices",
                p,
                "strictly positive finite values",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns_length() {
        let returns = simple_returns(&[100.0, 102.0, 101.0, 105.0]).unwrap();
        assert_eq!(returns.len(), 3);
    }

    #[test]
    fn test_simple_returns_values() {
        let returns = simple_returns(&[100.0, 102.0, 101.0]).unwrap();
        assert!((returns[0] - 0.02).abs() < 1e-12);
        assert!((returns[1] - (101.0 - 102.0) / 102.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_returns_values() {
        let returns = log_returns(&[100.0, 110.0]).unwrap();
        assert!((returns[0] - (1.1f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_prices() {
        let err = simple_returns(&[100.0]).unwrap_err();
        assert!(matches!(
            err,
            CadenaError::InsufficientData {
                required: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        assert!(simple_returns(&[100.0, 0.0, 101.0]).is_err());
        assert!(log_returns(&[100.0, -5.0]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_price() {
        assert!(simple_returns(&[100.0, f64::NAN]).is_err());
        assert!(simple_returns(&[100.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_constant_prices_give_zero_returns() {
        let returns = simple_returns(&[50.0, 50.0, 50.0, 50.0]).unwrap();
        assert!(returns.iter().all(|r| r.abs() < 1e-12));
    }
}
