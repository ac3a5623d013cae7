//! VaR engine: validation and dispatch.
//!
//! A request moves through four states:
//!
//! ```text
//! Received ──validate──> Validated ──compute──> Computed ──wrap──> Returned
//!     │                      │
//!     └──────────────────────┴──> Rejected (RiskError)
//! ```
//!
//! [`VarRequest`] is the received state, [`ValidatedRequest`] the validated
//! one, the estimator's signed loss the computed one and [`VarResult`] the
//! returned one. Rejections are final: the engine is deterministic for a
//! given seed, so retrying the same request cannot change its outcome.

use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::cancel::CancellationToken;
use crate::config::EngineConfig;
use crate::error::{ensure_finite, RiskResult};
use crate::request::{Estimator, SimulationSource, ValidatedRequest, VarRequest};
use crate::var::{historical_var, parametric_var, MonteCarloSimulator, PathModel, VarResult};

/// Stateless VaR calculator.
///
/// Holds only immutable configuration, so one engine can serve any number
/// of concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct VarEngine {
    config: EngineConfig,
}

impl VarEngine {
    /// Creates an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> RiskResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates a request and selects its estimator.
    pub fn validate(&self, request: VarRequest) -> RiskResult<ValidatedRequest> {
        ValidatedRequest::from_request(request, &self.config)
    }

    /// Evaluates a request. Monte Carlo draws from a generator seeded with
    /// the request seed, else the configured seed, else fresh entropy.
    pub fn evaluate(&self, request: VarRequest) -> RiskResult<VarResult> {
        self.run(request, None, None)
    }

    /// Evaluates a request drawing Monte Carlo samples from `rng`.
    pub fn evaluate_with_rng<R: RngCore>(
        &self,
        request: VarRequest,
        rng: &mut R,
    ) -> RiskResult<VarResult> {
        self.run(request, Some(rng as &mut dyn RngCore), None)
    }

    /// Evaluates a request, abandoning a Monte Carlo run once `token` is cancelled.
    pub fn evaluate_cancellable(
        &self,
        request: VarRequest,
        token: CancellationToken,
    ) -> RiskResult<VarResult> {
        self.run(request, None, Some(token))
    }

    /// Runs the selected estimator, returning a signed loss fraction.
    ///
    /// When `rng` is `None` a generator is built from the request or
    /// configured seed. Non-simulation estimators ignore both `rng` and `cancel`.
    pub fn compute(
        &self,
        request: &ValidatedRequest,
        rng: Option<&mut dyn RngCore>,
        cancel: Option<CancellationToken>,
    ) -> RiskResult<f64> {
        let confidence = request.confidence;
        let horizon = request.horizon;

        let loss = match &request.estimator {
            Estimator::Historical { returns, lookback } => historical_var(
                returns.as_slice(),
                confidence,
                horizon,
                *lookback,
                self.config.historical_windows,
            )?,
            Estimator::Parametric(params) => {
                parametric_var(params.mean, params.volatility, confidence, horizon)?
            }
            Estimator::MonteCarlo {
                source,
                simulations,
                seed,
            } => {
                let model = match source {
                    SimulationSource::Normal(params) => PathModel::Normal {
                        mean: params.mean,
                        volatility: params.volatility,
                    },
                    SimulationSource::Bootstrap(history) => PathModel::Bootstrap(history.as_slice()),
                };

                let mut simulator = MonteCarloSimulator::new(model, horizon, *simulations)?;
                if let Some(token) = cancel {
                    simulator = simulator.with_cancellation(token);
                }

                match rng {
                    Some(rng) => simulator.var(confidence, rng)?,
                    None => {
                        let mut rng = self.seeded_rng(*seed);
                        simulator.var(confidence, &mut rng)?
                    }
                }
            }
        };

        ensure_finite(loss, "VaR estimate")
    }

    fn run(
        &self,
        request: VarRequest,
        rng: Option<&mut dyn RngCore>,
        cancel: Option<CancellationToken>,
    ) -> RiskResult<VarResult> {
        debug!(
            "VaR request received: {} at {} over {} returns",
            request.method,
            request.confidence,
            request.returns.len()
        );

        let validated = self
            .validate(request)
            .inspect_err(|err| debug!("VaR request rejected at validation: {err}"))?;

        let loss = self
            .compute(&validated, rng, cancel)
            .inspect_err(|err| debug!("VaR request rejected during computation: {err}"))?;

        let result = VarResult::new(loss, validated.method(), validated.confidence);
        debug!("VaR request returned: {result}");
        Ok(result)
    }

    fn seeded_rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
