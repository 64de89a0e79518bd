//! Descriptive statistics shared across the crate.
//!
//! Summary moments and empirical quantiles with linear interpolation,
//! used by risk analysis and model comparison.

/// Summary statistics for a sample.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    /// Number of samples
    pub n: usize,
}

impl Statistics {
    /// Calculate statistics from values.
    ///
    /// Returns all-zero statistics for an empty slice. Skewness and excess
    /// kurtosis are zero when the sample has no variance.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len();
        let n_f = n as f64;

        let mean = values.iter().sum::<f64>() / n_f;
        let variance =
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n_f - 1.0).max(1.0);
        let std = variance.sqrt();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (skewness, kurtosis) = if std > 0.0 {
            let m3 = values
                .iter()
                .map(|x| ((x - mean) / std).powi(3))
                .sum::<f64>()
                / n_f;
            let m4 = values
                .iter()
                .map(|x| ((x - mean) / std).powi(4))
                .sum::<f64>()
                / n_f;
            (m3, m4 - 3.0)
        } else {
            (0.0, 0.0)
        };

        Self {
            mean,
            std,
            min,
            max,
            skewness,
            kurtosis,
            n,
        }
    }
}

/// Calculate an empirical quantile from a slice of values.
///
/// Uses linear interpolation between order statistics; `p` is clamped to
/// `[0, 1]`. Returns 0.0 for an empty slice.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let idx = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    let frac = idx - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}
