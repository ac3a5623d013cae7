//! Value at Risk (VaR) estimators.
//!
//! VaR estimates the loss not expected to be exceeded over a specified time
//! horizon at a given confidence level. Each estimator returns a signed loss
//! (positive = loss); [`VarResult`] floors it at zero.

mod historical;
mod monte_carlo;
mod parametric;

pub use historical::*;
pub use monte_carlo::*;
pub use parametric::*;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::error::RiskError;

/// Value at Risk result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarResult {
    /// Expected loss as a non-negative fraction of portfolio value
    pub value: f64,
    /// Method used for calculation
    pub method: VarMethod,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence: f64,
}

impl VarResult {
    /// Wraps an estimator's signed loss. A quantile that lies in the gains
    /// (negative loss) is reported as zero loss.
    #[must_use]
    pub fn new(loss: f64, method: VarMethod, confidence: Confidence) -> Self {
        Self {
            value: if loss > 0.0 { loss } else { 0.0 },
            method,
            confidence: confidence.level(),
        }
    }

    /// Loss in currency units for a position of `portfolio_value`, rounded to cents.
    #[must_use]
    pub fn loss_amount(&self, portfolio_value: Decimal) -> Decimal {
        let fraction = Decimal::from_f64_retain(self.value).unwrap_or(Decimal::ZERO);
        (fraction * portfolio_value).round_dp(2)
    }
}

/// VaR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    /// Historical simulation
    Historical,
    /// Parametric (variance-covariance)
    Parametric,
    /// Monte Carlo simulation
    #[serde(alias = "monte_carlo")]
    MonteCarlo,
}

impl VarMethod {
    /// All methods, in report order.
    pub const ALL: [Self; 3] = [Self::Historical, Self::Parametric, Self::MonteCarlo];

    /// Wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Parametric => "parametric",
            Self::MonteCarlo => "montecarlo",
        }
    }
}

impl fmt::Display for VarMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarMethod {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "historical" => Ok(Self::Historical),
            "parametric" => Ok(Self::Parametric),
            "montecarlo" | "monte_carlo" | "monte-carlo" => Ok(Self::MonteCarlo),
            other => Err(RiskError::invalid_parameter(
                "method",
                format!("unknown method `{other}`, expected historical, parametric or montecarlo"),
            )),
        }
    }
}

impl fmt::Display for VarResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}): {:.4}%",
            self.confidence * 100.0,
            self.method,
            self.value * 100.0
        )
    }
}
