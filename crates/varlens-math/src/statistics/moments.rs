//! First and second moments of a return sample.

use crate::error::{ensure_finite, MathError, MathResult};

/// Mean and standard deviation of a sample.
///
/// The standard deviation is the population estimate (sum of squared
/// deviations divided by `N`), the convention used when a one-period
/// volatility is read straight off a return history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Number of observations.
    pub count: usize,
}

impl Moments {
    /// Estimates the moments of `values`.
    ///
    /// Requires at least two observations; a single point has no dispersion
    /// to measure.
    pub fn from_sample(values: &[f64]) -> MathResult<Self> {
        if values.len() < 2 {
            return Err(MathError::insufficient_data(2, values.len()));
        }

        let n = values.len() as f64;
        let mean = ensure_finite(values.iter().sum::<f64>() / n, "sample mean")?;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = ensure_finite(variance.sqrt(), "sample standard deviation")?;

        Ok(Self {
            mean,
            std_dev,
            count: values.len(),
        })
    }
}
