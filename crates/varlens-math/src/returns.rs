//! Return construction from price histories.

use crate::error::{MathError, MathResult};

/// Day-over-day simple returns `(p[i] - p[i-1]) / p[i-1]`.
///
/// Produces `prices.len() - 1` returns in the same (chronological) order.
///
/// # Errors
///
/// * [`MathError::InsufficientData`] with fewer than two prices
/// * [`MathError::InvalidInput`] if any price is non-finite or not strictly positive
pub fn simple_returns(prices: &[f64]) -> MathResult<Vec<f64>> {
    if prices.len() < 2 {
        return Err(MathError::insufficient_data(2, prices.len()));
    }
    if let Some((i, p)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(MathError::invalid_input(format!(
            "price at position {i} must be positive and finite, got {p}"
        )));
    }

    Ok(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
}
