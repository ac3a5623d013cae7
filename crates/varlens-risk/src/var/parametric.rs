//! Parametric (variance-covariance) VaR calculation.

use log::debug;

use crate::confidence::Confidence;
use crate::error::{ensure_finite, RiskError, RiskResult};
use crate::horizon::Horizon;

/// Calculate parametric VaR assuming normally distributed returns.
///
/// VaR = -(n × μ - z × σ × √n), where z is the standard normal critical value
/// of the confidence level. The result is non-decreasing in both the
/// confidence level and the volatility.
///
/// # Arguments
///
/// * `mean` - One-period mean return
/// * `volatility` - One-period volatility (standard deviation)
/// * `confidence` - Confidence level
/// * `horizon` - Time horizon in days
///
/// # Returns
///
/// VaR as a signed loss fraction (positive = loss)
pub fn parametric_var(
    mean: f64,
    volatility: f64,
    confidence: Confidence,
    horizon: Horizon,
) -> RiskResult<f64> {
    validate_normal_params(mean, volatility)?;

    let z = confidence.z_score()?;
    let var = horizon.scale_normal_var(mean, volatility, z);

    debug!(
        "parametric VaR: mean {:.6}, volatility {:.6}, z {:.4}, horizon {} -> {:.6}",
        mean, volatility, z, horizon, var
    );

    ensure_finite(var, "parametric VaR")
}

/// Checks a one-period mean/volatility pair.
pub(crate) fn validate_normal_params(mean: f64, volatility: f64) -> RiskResult<()> {
    if !mean.is_finite() {
        return Err(RiskError::invalid_parameter(
            "mean",
            format!("must be finite, got {mean}"),
        ));
    }
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(RiskError::invalid_parameter(
            "volatility",
            format!("must be non-negative and finite, got {volatility}"),
        ));
    }
    Ok(())
}
