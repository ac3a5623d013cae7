//! Historical VaR calculation.

use log::{debug, warn};
use varlens_math::statistics::{quantile_in_place, rolling_sums};

use crate::config::HistoricalWindows;
use crate::confidence::Confidence;
use crate::error::{RiskError, RiskResult};
use crate::horizon::Horizon;

/// Calculate historical VaR from a series of returns.
///
/// The sample is the most recent `lookback` returns (the whole series when
/// `lookback` is `None` or longer than the series). For a one-day horizon
/// the VaR is the negated `(1 - c)` empirical quantile of that sample, with
/// linear interpolation between order statistics. For longer horizons the
/// sample is first aggregated into n-day returns according to `windows`;
/// the one-day quantile is never rescaled by `√n`.
///
/// # Arguments
///
/// * `returns` - Historical returns, oldest first (as decimals, e.g., -0.01 for -1%)
/// * `confidence` - Confidence level
/// * `horizon` - Time horizon in days
/// * `lookback` - Number of most recent returns to use
/// * `windows` - How n-day returns are cut from history
///
/// # Returns
///
/// VaR as a signed loss fraction (positive = loss)
pub fn historical_var(
    returns: &[f64],
    confidence: Confidence,
    horizon: Horizon,
    lookback: Option<usize>,
    windows: HistoricalWindows,
) -> RiskResult<f64> {
    let sample = match lookback {
        Some(0) => {
            return Err(RiskError::invalid_parameter(
                "lookbackDays",
                "must be positive",
            ))
        }
        Some(n) if n > returns.len() => {
            warn!(
                "lookback of {} days exceeds the {} available returns, using the full series",
                n,
                returns.len()
            );
            returns
        }
        Some(n) => &returns[returns.len() - n..],
        None => returns,
    };

    if sample.len() < 2 {
        return Err(RiskError::insufficient_data(2, sample.len()));
    }

    let mut outcomes = if horizon == Horizon::ONE_DAY {
        sample.to_vec()
    } else {
        let n = horizon.periods();
        let step = match windows {
            HistoricalWindows::Overlapping => 1,
            HistoricalWindows::NonOverlapping => n,
        };
        let sums = rolling_sums(sample, n, step)?;
        if sums.len() < 2 {
            return Err(RiskError::insufficient_data(
                windows.min_observations(horizon),
                sample.len(),
            ));
        }
        sums
    };

    debug!(
        "historical VaR over {} outcomes ({} returns, horizon {}, {:?})",
        outcomes.len(),
        sample.len(),
        horizon,
        windows
    );

    let quantile = quantile_in_place(&mut outcomes, confidence.tail_probability())?;
    Ok(-quantile)
}
