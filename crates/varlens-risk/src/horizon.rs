//! Time horizon scaling.
//!
//! Under the assumption that one-period returns are i.i.d. with finite
//! variance, an n-period return has mean `n * μ` and standard deviation
//! `√n * σ` (the square-root-of-time rule). These helpers apply that rule to
//! one-period statistics. They are valid for the normal-model estimators
//! only; historical quantiles are rebuilt from n-period windows instead.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// A positive number of periods (trading days) over which loss is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Horizon(NonZeroU32);

impl Horizon {
    /// A single period.
    pub const ONE_DAY: Self = Self(NonZeroU32::MIN);

    /// Creates a horizon of `days` periods.
    ///
    /// # Errors
    ///
    /// [`RiskError::InvalidParameter`] unless `days` is positive and fits in `u32`.
    pub fn new(days: i64) -> RiskResult<Self> {
        u32::try_from(days)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| {
                RiskError::invalid_parameter(
                    "horizonDays",
                    format!("must be a positive whole number of days, got {days}"),
                )
            })
    }

    /// Number of periods.
    #[must_use]
    pub fn days(self) -> u32 {
        self.0.get()
    }

    /// Number of periods as a usize, for window arithmetic.
    #[must_use]
    pub fn periods(self) -> usize {
        self.0.get() as usize
    }

    /// `√n`.
    #[must_use]
    pub fn sqrt(self) -> f64 {
        f64::from(self.days()).sqrt()
    }

    /// Scales a one-period mean to the horizon: `n * μ`.
    #[must_use]
    pub fn scale_mean(self, mean: f64) -> f64 {
        mean * f64::from(self.days())
    }

    /// Scales a one-period volatility to the horizon: `√n * σ`.
    #[must_use]
    pub fn scale_volatility(self, volatility: f64) -> f64 {
        volatility * self.sqrt()
    }

    /// Horizon VaR of a normal one-period return with the given moments:
    /// `-(n * μ - z * √n * σ)`.
    ///
    /// Positive values are losses.
    #[must_use]
    pub fn scale_normal_var(self, mean: f64, volatility: f64, z: f64) -> f64 {
        -(self.scale_mean(mean) - z * self.scale_volatility(volatility))
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self::ONE_DAY
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days())
    }
}
