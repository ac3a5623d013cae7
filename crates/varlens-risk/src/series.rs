//! Return series and their construction from dated prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use varlens_math::returns::simple_returns;
use varlens_math::statistics::Moments;

use crate::error::{RiskError, RiskResult};

/// Chronologically ordered single-period fractional returns.
///
/// Estimators treat the series as an unordered sample; order only matters
/// for lookback truncation, which keeps the most recent observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Wraps a vector of returns, oldest first.
    ///
    /// # Errors
    ///
    /// [`RiskError::InvalidParameter`] if any return is NaN or infinite.
    pub fn new(returns: Vec<f64>) -> RiskResult<Self> {
        if let Some(i) = returns.iter().position(|r| !r.is_finite()) {
            return Err(RiskError::invalid_parameter(
                "returns",
                format!("entry {i} is not a finite number"),
            ));
        }
        Ok(Self(returns))
    }

    /// Day-over-day returns of an undated price history, oldest first.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InsufficientData`] with fewer than two prices
    /// * [`RiskError::InvalidParameter`] for non-positive or non-finite prices
    pub fn from_prices(prices: &[f64]) -> RiskResult<Self> {
        simple_returns(prices).map(Self).map_err(price_error)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All observations, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The most recent `n` observations, or the whole series when it is shorter.
    #[must_use]
    pub fn most_recent(&self, n: usize) -> &[f64] {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    /// Mean and population standard deviation of the series.
    pub fn moments(&self) -> RiskResult<Moments> {
        Ok(Moments::from_sample(&self.0)?)
    }
}

impl TryFrom<Vec<f64>> for ReturnSeries {
    type Error = RiskError;

    fn try_from(returns: Vec<f64>) -> RiskResult<Self> {
        Self::new(returns)
    }
}

impl From<ReturnSeries> for Vec<f64> {
    fn from(series: ReturnSeries) -> Self {
        series.0
    }
}

fn price_error(err: varlens_math::MathError) -> RiskError {
    match RiskError::from(err) {
        RiskError::InvalidParameter { reason, .. } => RiskError::invalid_parameter("prices", reason),
        other => other,
    }
}

/// A closing price on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing (or adjusted closing) price.
    pub close: f64,
}

/// A single-period return ending on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Date of the closing price the return ends on.
    pub date: NaiveDate,
    /// Fractional return since the previous close.
    #[serde(rename = "return")]
    pub value: f64,
}

/// Day-over-day returns derived from a dated price history.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedReturns {
    points: Vec<ReturnPoint>,
}

impl DatedReturns {
    /// Builds returns from prices. Prices are ordered by date first, so
    /// providers that list the newest observation first are handled.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InsufficientData`] with fewer than two prices
    /// * [`RiskError::InvalidParameter`] for non-positive or non-finite prices
    pub fn from_prices(prices: &[PricePoint]) -> RiskResult<Self> {
        let mut ordered = prices.to_vec();
        ordered.sort_by_key(|p| p.date);

        let closes: Vec<f64> = ordered.iter().map(|p| p.close).collect();
        let returns = simple_returns(&closes).map_err(price_error)?;

        let points = ordered[1..]
            .iter()
            .zip(returns)
            .map(|(price, value)| ReturnPoint {
                date: price.date,
                value,
            })
            .collect();

        Ok(Self { points })
    }

    /// All dated returns, oldest first.
    #[must_use]
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// The most recent `n` returns in chronological order.
    #[must_use]
    pub fn preview(&self, n: usize) -> &[ReturnPoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    /// The undated return series.
    #[must_use]
    pub fn to_series(&self) -> ReturnSeries {
        ReturnSeries(self.points.iter().map(|p| p.value).collect())
    }
}
