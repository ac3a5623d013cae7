//! Confidence levels.

use std::fmt;

use serde::{Deserialize, Serialize};
use varlens_math::distributions::inverse_norm_cdf;

use crate::error::{ensure_finite, RiskError, RiskResult};

/// A confidence level strictly between 0 and 1.
///
/// A confidence of 0.95 means the reported loss is exceeded with 5%
/// probability. Any level in the open interval is accepted; nothing is
/// special about 0.90, 0.95 or 0.99.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Validates a confidence level.
    ///
    /// # Errors
    ///
    /// [`RiskError::InvalidParameter`] when `level` is not strictly inside (0, 1).
    pub fn new(level: f64) -> RiskResult<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(RiskError::invalid_parameter(
                "confidence",
                format!("must lie strictly between 0 and 1, got {level}"),
            ))
        }
    }

    /// The confidence level as a probability.
    #[must_use]
    pub fn level(self) -> f64 {
        self.0
    }

    /// Probability mass in the loss tail, `1 - c`.
    #[must_use]
    pub fn tail_probability(self) -> f64 {
        1.0 - self.0
    }

    /// Standard normal critical value `z` with Φ(z) = c.
    ///
    /// Positive for every level above one half.
    pub fn z_score(self) -> RiskResult<f64> {
        let z = inverse_norm_cdf(self.0)?;
        ensure_finite(z, "inverse normal CDF")
    }
}

impl TryFrom<f64> for Confidence {
    type Error = RiskError;

    fn try_from(level: f64) -> RiskResult<Self> {
        Self::new(level)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
