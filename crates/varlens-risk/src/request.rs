//! VaR requests.
//!
//! A [`VarRequest`] is the flat shape received from callers: every
//! method-specific field is optional. [`ValidatedRequest`] is the same request
//! after validation, where the chosen [`Estimator`] carries exactly the
//! parameters its method needs, already checked and with defaults applied.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::confidence::Confidence;
use crate::error::{RiskError, RiskResult};
use crate::horizon::Horizon;
use crate::series::ReturnSeries;
use crate::var::VarMethod;

/// Returns a quantile-based estimator needs.
const MIN_OBSERVATIONS: usize = 2;

fn default_horizon_days() -> i64 {
    1
}

/// Where Monte Carlo paths are drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    /// Normal returns with the request's (or estimated) mean and volatility.
    #[default]
    Normal,
    /// Returns resampled with replacement from the request's history.
    Bootstrap,
}

/// A VaR request as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarRequest {
    /// Estimation method.
    pub method: VarMethod,

    /// One-period returns, oldest first.
    #[serde(default)]
    pub returns: Vec<f64>,

    /// Confidence level in (0, 1).
    pub confidence: f64,

    /// Horizon in days (defaults to 1).
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,

    /// Historical: number of most recent returns to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback_days: Option<i64>,

    /// Parametric / Monte Carlo: one-period mean (estimated from `returns` when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    /// Parametric / Monte Carlo: one-period volatility (estimated from `returns` when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,

    /// Monte Carlo: number of simulated paths (engine default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_count: Option<i64>,

    /// Monte Carlo: path distribution.
    #[serde(default)]
    pub sampling: Sampling,

    /// Monte Carlo: seed for a reproducible run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl VarRequest {
    fn base(method: VarMethod, returns: Vec<f64>, confidence: f64) -> Self {
        Self {
            method,
            returns,
            confidence,
            horizon_days: default_horizon_days(),
            lookback_days: None,
            mean: None,
            volatility: None,
            simulation_count: None,
            sampling: Sampling::default(),
            seed: None,
        }
    }

    /// Historical simulation over `returns`.
    #[must_use]
    pub fn historical(returns: Vec<f64>, confidence: f64) -> Self {
        Self::base(VarMethod::Historical, returns, confidence)
    }

    /// Parametric VaR from explicit moments.
    #[must_use]
    pub fn parametric(mean: f64, volatility: f64, confidence: f64) -> Self {
        Self::base(VarMethod::Parametric, Vec::new(), confidence).with_moments(mean, volatility)
    }

    /// Monte Carlo VaR from explicit moments.
    #[must_use]
    pub fn monte_carlo(mean: f64, volatility: f64, confidence: f64, simulations: i64) -> Self {
        Self::base(VarMethod::MonteCarlo, Vec::new(), confidence)
            .with_moments(mean, volatility)
            .with_simulations(simulations)
    }

    /// Replaces the method.
    #[must_use]
    pub fn with_method(mut self, method: VarMethod) -> Self {
        self.method = method;
        self
    }

    /// Replaces the confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Replaces the return series.
    #[must_use]
    pub fn with_returns(mut self, returns: Vec<f64>) -> Self {
        self.returns = returns;
        self
    }

    /// Sets the horizon in days.
    #[must_use]
    pub fn with_horizon(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the historical lookback in days.
    #[must_use]
    pub fn with_lookback(mut self, days: i64) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Sets explicit one-period moments.
    #[must_use]
    pub fn with_moments(mut self, mean: f64, volatility: f64) -> Self {
        self.mean = Some(mean);
        self.volatility = Some(volatility);
        self
    }

    /// Sets the Monte Carlo path count.
    #[must_use]
    pub fn with_simulations(mut self, simulations: i64) -> Self {
        self.simulation_count = Some(simulations);
        self
    }

    /// Sets the Monte Carlo sampling scheme.
    #[must_use]
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the Monte Carlo seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One-period normal return parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    /// Mean return.
    pub mean: f64,
    /// Volatility (standard deviation), non-negative.
    pub volatility: f64,
}

impl NormalParams {
    /// Validates a mean/volatility pair.
    pub fn new(mean: f64, volatility: f64) -> RiskResult<Self> {
        crate::var::validate_normal_params(mean, volatility)?;
        Ok(Self { mean, volatility })
    }

    /// Resolves moments for the normal-model estimators: explicit values win,
    /// missing ones are estimated from `returns`.
    fn resolve(mean: Option<f64>, volatility: Option<f64>, returns: &ReturnSeries) -> RiskResult<Self> {
        if let Some(vol) = volatility {
            if vol.is_nan() || vol < 0.0 {
                return Err(RiskError::invalid_parameter(
                    "volatility",
                    format!("must be non-negative, got {vol}"),
                ));
            }
        }

        match (mean, volatility) {
            (Some(mean), Some(vol)) => Self::new(mean, vol),
            _ => {
                if returns.len() < MIN_OBSERVATIONS {
                    return Err(RiskError::insufficient_data(MIN_OBSERVATIONS, returns.len()));
                }
                let moments = returns.moments()?;
                debug!(
                    "estimated moments from {} returns: mean {:.6}, volatility {:.6}",
                    moments.count, moments.mean, moments.std_dev
                );
                Self::new(
                    mean.unwrap_or(moments.mean),
                    volatility.unwrap_or(moments.std_dev),
                )
            }
        }
    }
}

/// Path source of a validated Monte Carlo request.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationSource {
    /// Normal paths.
    Normal(NormalParams),
    /// Bootstrap paths from history.
    Bootstrap(ReturnSeries),
}

/// The estimator selected by a request, with the parameters it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimator {
    /// Historical simulation.
    Historical {
        /// Return history, at least two observations.
        returns: ReturnSeries,
        /// Most recent observations to keep.
        lookback: Option<usize>,
    },
    /// Parametric normal VaR.
    Parametric(NormalParams),
    /// Monte Carlo simulation.
    MonteCarlo {
        /// Path distribution.
        source: SimulationSource,
        /// Number of paths, positive and within the engine limit.
        simulations: usize,
        /// Seed for this request, if any.
        seed: Option<u64>,
    },
}

impl Estimator {
    /// Method this estimator implements.
    #[must_use]
    pub fn method(&self) -> VarMethod {
        match self {
            Self::Historical { .. } => VarMethod::Historical,
            Self::Parametric(_) => VarMethod::Parametric,
            Self::MonteCarlo { .. } => VarMethod::MonteCarlo,
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Confidence level.
    pub confidence: Confidence,
    /// Horizon.
    pub horizon: Horizon,
    /// Selected estimator.
    pub estimator: Estimator,
}

impl ValidatedRequest {
    /// Validates `request` against `config`.
    ///
    /// Checks run in order: confidence, horizon, return values, then the
    /// parameters of the requested method.
    pub fn from_request(request: VarRequest, config: &EngineConfig) -> RiskResult<Self> {
        let confidence = Confidence::new(request.confidence)?;
        let horizon = Horizon::new(request.horizon_days)?;
        let returns = ReturnSeries::new(request.returns)?;

        let estimator = match request.method {
            VarMethod::Historical => {
                let lookback = request
                    .lookback_days
                    .map(|days| {
                        usize::try_from(days).ok().filter(|d| *d > 0).ok_or_else(|| {
                            RiskError::invalid_parameter(
                                "lookbackDays",
                                format!("must be positive, got {days}"),
                            )
                        })
                    })
                    .transpose()?;
                if returns.len() < MIN_OBSERVATIONS {
                    return Err(RiskError::insufficient_data(MIN_OBSERVATIONS, returns.len()));
                }
                Estimator::Historical { returns, lookback }
            }
            VarMethod::Parametric => {
                Estimator::Parametric(NormalParams::resolve(request.mean, request.volatility, &returns)?)
            }
            VarMethod::MonteCarlo => {
                let simulations = simulation_count(request.simulation_count, config)?;
                let source = match request.sampling {
                    Sampling::Normal => SimulationSource::Normal(NormalParams::resolve(
                        request.mean,
                        request.volatility,
                        &returns,
                    )?),
                    Sampling::Bootstrap => {
                        check_bootstrap_draws(simulations, horizon, config)?;
                        if returns.len() < MIN_OBSERVATIONS {
                            return Err(RiskError::insufficient_data(
                                MIN_OBSERVATIONS,
                                returns.len(),
                            ));
                        }
                        SimulationSource::Bootstrap(returns)
                    }
                };
                Estimator::MonteCarlo {
                    source,
                    simulations,
                    seed: request.seed,
                }
            }
        };

        Ok(Self {
            confidence,
            horizon,
            estimator,
        })
    }

    /// Method of the selected estimator.
    #[must_use]
    pub fn method(&self) -> VarMethod {
        self.estimator.method()
    }
}

fn simulation_count(requested: Option<i64>, config: &EngineConfig) -> RiskResult<usize> {
    let Some(count) = requested else {
        return Ok(config.default_simulations);
    };

    let count = usize::try_from(count).ok().filter(|c| *c > 0).ok_or_else(|| {
        RiskError::invalid_parameter("simulationCount", format!("must be positive, got {count}"))
    })?;

    if count > config.max_simulations {
        return Err(RiskError::invalid_parameter(
            "simulationCount",
            format!("must not exceed {}, got {count}", config.max_simulations),
        ));
    }
    Ok(count)
}

fn check_bootstrap_draws(simulations: usize, horizon: Horizon, config: &EngineConfig) -> RiskResult<()> {
    let draws = simulations.saturating_mul(horizon.periods());
    if draws > config.max_bootstrap_draws {
        return Err(RiskError::invalid_parameter(
            "simulationCount",
            format!(
                "{simulations} bootstrap paths over {horizon} need {draws} draws, more than the limit of {}",
                config.max_bootstrap_draws
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(request: VarRequest) -> RiskResult<ValidatedRequest> {
        ValidatedRequest::from_request(request, &EngineConfig::default())
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "method": "montecarlo",
            "returns": [0.01, -0.02, 0.005],
            "confidence": 0.99,
            "horizonDays": 10,
            "simulationCount": 5000,
            "seed": 3
        }"#;
        let request: VarRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, VarMethod::MonteCarlo);
        assert_eq!(request.horizon_days, 10);
        assert_eq!(request.simulation_count, Some(5000));
        assert_eq!(request.sampling, Sampling::Normal);
        assert_eq!(request.seed, Some(3));
    }

    #[test]
    fn test_horizon_defaults_to_one_day() {
        let request: VarRequest =
            serde_json::from_str(r#"{"method": "historical", "returns": [0.01, 0.02], "confidence": 0.95}"#)
                .unwrap();
        assert_eq!(request.horizon_days, 1);
    }

    #[test]
    fn test_historical_validation() {
        let validated = validate(VarRequest::historical(vec![0.01, -0.02, 0.03], 0.95).with_lookback(2)).unwrap();
        assert_eq!(validated.method(), VarMethod::Historical);
        match validated.estimator {
            Estimator::Historical { returns, lookback } => {
                assert_eq!(returns.len(), 3);
                assert_eq!(lookback, Some(2));
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_historical_needs_two_returns() {
        assert_eq!(
            validate(VarRequest::historical(vec![], 0.95)).unwrap_err(),
            RiskError::insufficient_data(2, 0)
        );
        assert_eq!(
            validate(VarRequest::historical(vec![0.01], 0.95)).unwrap_err(),
            RiskError::insufficient_data(2, 1)
        );
    }

    #[test]
    fn test_negative_lookback_rejected() {
        let err = validate(VarRequest::historical(vec![0.01, 0.02], 0.95).with_lookback(-3)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "lookbackDays"));
    }

    #[test]
    fn test_confidence_checked_first() {
        let err = validate(VarRequest::historical(vec![], 1.0)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "confidence"));
    }

    #[test]
    fn test_horizon_rejected() {
        let err = validate(VarRequest::parametric(0.0, 0.02, 0.95).with_horizon(0)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "horizonDays"));
    }

    #[test]
    fn test_parametric_explicit_moments_need_no_returns() {
        let validated = validate(VarRequest::parametric(0.001, 0.02, 0.95)).unwrap();
        assert_eq!(
            validated.estimator,
            Estimator::Parametric(NormalParams { mean: 0.001, volatility: 0.02 })
        );
    }

    #[test]
    fn test_parametric_moments_estimated_from_returns() {
        let request = VarRequest::historical(vec![0.01, -0.01, 0.01, -0.01], 0.95)
            .with_method(VarMethod::Parametric);
        let validated = validate(request).unwrap();
        match validated.estimator {
            Estimator::Parametric(params) => {
                assert!(params.mean.abs() < 1e-15);
                assert!((params.volatility - 0.01).abs() < 1e-15);
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_explicit_volatility_overrides_estimate() {
        let mut request = VarRequest::historical(vec![0.01, -0.01, 0.03], 0.95).with_method(VarMethod::Parametric);
        request.volatility = Some(0.05);
        match validate(request).unwrap().estimator {
            Estimator::Parametric(params) => {
                assert!((params.mean - 0.01).abs() < 1e-15);
                assert!((params.volatility - 0.05).abs() < 1e-15);
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_negative_volatility_rejected_without_returns() {
        let err = validate(VarRequest::parametric(0.0, -0.01, 0.95)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "volatility"));

        let mut partial = VarRequest::historical(vec![], 0.95).with_method(VarMethod::MonteCarlo);
        partial.volatility = Some(-0.01);
        assert!(matches!(validate(partial).unwrap_err(), RiskError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_moments_without_history() {
        let request = VarRequest::historical(vec![], 0.95).with_method(VarMethod::Parametric);
        assert_eq!(validate(request).unwrap_err(), RiskError::insufficient_data(2, 0));
    }

    #[test]
    fn test_simulation_count() {
        let defaulted = VarRequest::parametric(0.0, 0.02, 0.95).with_method(VarMethod::MonteCarlo);
        match validate(defaulted).unwrap().estimator {
            Estimator::MonteCarlo { simulations, .. } => assert_eq!(simulations, 10_000),
            other => panic!("unexpected estimator {other:?}"),
        }

        for bad in [0, -5, 1_000_000_000] {
            let err = validate(VarRequest::monte_carlo(0.0, 0.02, 0.95, bad)).unwrap_err();
            assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "simulationCount"));
        }
    }

    #[test]
    fn test_bootstrap_keeps_history() {
        let request = VarRequest::historical(vec![0.01, -0.02, 0.03], 0.95)
            .with_method(VarMethod::MonteCarlo)
            .with_sampling(Sampling::Bootstrap)
            .with_seed(9);
        match validate(request).unwrap().estimator {
            Estimator::MonteCarlo {
                source: SimulationSource::Bootstrap(history),
                seed,
                ..
            } => {
                assert_eq!(history.len(), 3);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_bootstrap_draws_limited() {
        let request = |days| {
            VarRequest::historical(vec![0.01, -0.02, 0.03], 0.95)
                .with_method(VarMethod::MonteCarlo)
                .with_sampling(Sampling::Bootstrap)
                .with_simulations(2)
                .with_horizon(days)
        };

        let err = validate(request(400_000_000)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "simulationCount"));

        let config = EngineConfig::new().with_max_bootstrap_draws(20);
        assert!(ValidatedRequest::from_request(request(10), &config).is_ok());
        assert!(ValidatedRequest::from_request(request(11), &config).is_err());

        // Normal paths are one draw each whatever the horizon.
        let normal = VarRequest::monte_carlo(0.0, 0.02, 0.95, 2).with_horizon(400_000_000);
        assert!(validate(normal).is_ok());
    }

    #[test]
    fn test_non_finite_returns_rejected() {
        let err = validate(VarRequest::historical(vec![0.01, f64::INFINITY], 0.95)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "returns"));
    }
}
