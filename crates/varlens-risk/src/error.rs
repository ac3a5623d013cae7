//! Error types for risk calculations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use varlens_math::MathError;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during VaR estimation.
///
/// Every error is a permanent rejection of the request that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// A request parameter is outside its valid domain.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The return series is too short for the requested estimator.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// NaN or an infinity surfaced from an approximated or randomized computation.
    #[error("numeric instability in {context}")]
    NumericInstability {
        /// The computation that produced the value.
        context: String,
    },

    /// The computation was cancelled before completing.
    #[error("computation cancelled")]
    Cancelled,
}

/// Coarse classification of a [`RiskError`], stable across releases and
/// suitable for wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`RiskError::InvalidParameter`].
    InvalidParameter,
    /// See [`RiskError::InsufficientData`].
    InsufficientData,
    /// See [`RiskError::NumericInstability`].
    NumericInstability,
    /// See [`RiskError::Cancelled`].
    Cancelled,
}

impl RiskError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a numeric instability error.
    #[must_use]
    pub fn numeric_instability(context: impl Into<String>) -> Self {
        Self::NumericInstability {
            context: context.into(),
        }
    }

    /// The kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::NumericInstability { .. } => ErrorKind::NumericInstability,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::InvalidInput { reason } => Self::invalid_parameter("input", reason),
            MathError::NonFinite { operation } => Self::NumericInstability { context: operation },
        }
    }
}

/// Returns `value` if it is finite, otherwise a numeric instability error.
pub(crate) fn ensure_finite(value: f64, context: &str) -> RiskResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RiskError::numeric_instability(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            RiskError::invalid_parameter("confidence", "out of range").kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(RiskError::insufficient_data(2, 0).kind(), ErrorKind::InsufficientData);
        assert_eq!(
            RiskError::numeric_instability("test").kind(),
            ErrorKind::NumericInstability
        );
    }

    #[test]
    fn test_from_math_error() {
        let err: RiskError = MathError::insufficient_data(2, 1).into();
        assert_eq!(err, RiskError::insufficient_data(2, 1));

        let err: RiskError = MathError::non_finite("quantile interpolation").into();
        assert_eq!(err.kind(), ErrorKind::NumericInstability);
    }

    #[test]
    fn test_display() {
        let err = RiskError::invalid_parameter("volatility", "must be non-negative, got -0.01");
        assert_eq!(
            err.to_string(),
            "invalid parameter `volatility`: must be non-negative, got -0.01"
        );
    }
}
