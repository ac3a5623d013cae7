//! Monte Carlo VaR calculation.

use log::debug;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use varlens_math::statistics::quantile_in_place;

use super::parametric::validate_normal_params;
use crate::cancel::CancellationToken;
use crate::confidence::Confidence;
use crate::error::{RiskError, RiskResult};
use crate::horizon::Horizon;

/// Draws between cancellation checks.
const BATCH_SIZE: usize = 8192;

/// Distribution a simulated path is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathModel<'a> {
    /// Normal one-period returns. An n-day path is a single draw from
    /// Normal(n × μ, n × σ²), which is exactly the distribution of a sum of
    /// n independent one-period draws.
    Normal {
        /// One-period mean return.
        mean: f64,
        /// One-period volatility.
        volatility: f64,
    },
    /// One-period returns resampled with replacement from history. An n-day
    /// path is the sum of n resampled returns.
    Bootstrap(&'a [f64]),
}

/// Simulates horizon outcomes and reads VaR off their empirical quantile.
///
/// The random source is always supplied by the caller, so a seeded
/// generator reproduces the same outcomes and the same VaR.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use varlens_risk::prelude::*;
/// use varlens_risk::var::{MonteCarloSimulator, PathModel};
///
/// let model = PathModel::Normal { mean: 0.0, volatility: 0.02 };
/// let simulator = MonteCarloSimulator::new(model, Horizon::ONE_DAY, 50_000).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let var = simulator.var(Confidence::new(0.95).unwrap(), &mut rng).unwrap();
/// assert!((var - 0.0329).abs() < 0.001);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator<'a> {
    model: PathModel<'a>,
    horizon: Horizon,
    simulations: usize,
    cancel: Option<CancellationToken>,
}

impl<'a> MonteCarloSimulator<'a> {
    /// Creates a simulator of `simulations` paths over `horizon`.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InvalidParameter`] for a zero simulation count, a
    ///   non-finite mean, or a negative or non-finite volatility
    /// * [`RiskError::InsufficientData`] for an empty bootstrap history
    pub fn new(model: PathModel<'a>, horizon: Horizon, simulations: usize) -> RiskResult<Self> {
        if simulations == 0 {
            return Err(RiskError::invalid_parameter(
                "simulationCount",
                "must be positive",
            ));
        }
        match model {
            PathModel::Normal { mean, volatility } => validate_normal_params(mean, volatility)?,
            PathModel::Bootstrap(history) if history.is_empty() => {
                return Err(RiskError::insufficient_data(1, 0));
            }
            PathModel::Bootstrap(_) => {}
        }

        Ok(Self {
            model,
            horizon,
            simulations,
            cancel: None,
        })
    }

    /// Polls `token` every [`BATCH_SIZE`] draws, including inside long
    /// bootstrap paths.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of simulated paths.
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Simulated horizon returns (the synthetic P&L series as fractions of
    /// portfolio value), one per path.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> RiskResult<Vec<f64>> {
        let mut outcomes = Vec::with_capacity(self.simulations);

        match self.model {
            PathModel::Normal { mean, volatility } => {
                let horizon_mean = self.horizon.scale_mean(mean);
                let horizon_volatility = self.horizon.scale_volatility(volatility);
                if !horizon_mean.is_finite() || !horizon_volatility.is_finite() {
                    return Err(RiskError::numeric_instability("Monte Carlo horizon scaling"));
                }
                let dist = Normal::new(horizon_mean, horizon_volatility)
                    .map_err(|e| RiskError::invalid_parameter("volatility", e.to_string()))?;

                self.fill(&mut outcomes, 1, |out, n| {
                    out.extend((0..n).map(|_| dist.sample(&mut *rng)));
                    Ok(())
                })?;
            }
            PathModel::Bootstrap(history) => {
                let pick = Uniform::new(0, history.len());
                let periods = self.horizon.periods();

                self.fill(&mut outcomes, periods, |out, n| {
                    for _ in 0..n {
                        let completed = out.len();
                        out.push(self.bootstrap_path(history, &pick, periods, completed, &mut *rng)?);
                    }
                    Ok(())
                })?;
            }
        }

        if outcomes.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::numeric_instability("Monte Carlo sampling"));
        }
        Ok(outcomes)
    }

    /// VaR at `confidence`: the negated `(1 - c)` quantile of the simulated
    /// outcomes, interpolated exactly as in historical simulation.
    pub fn var<R: Rng + ?Sized>(&self, confidence: Confidence, rng: &mut R) -> RiskResult<f64> {
        let mut outcomes = self.simulate(rng)?;
        let quantile = quantile_in_place(&mut outcomes, confidence.tail_probability())?;

        debug!(
            "Monte Carlo VaR: {} paths over {}, {:?} -> {:.6}",
            self.simulations,
            self.horizon,
            self.model_name(),
            -quantile
        );

        Ok(-quantile)
    }

    /// Runs `draw` in batches of about [`BATCH_SIZE`] draws until every path
    /// is generated, checking for cancellation in between.
    fn fill<F>(&self, outcomes: &mut Vec<f64>, draws_per_path: usize, mut draw: F) -> RiskResult<()>
    where
        F: FnMut(&mut Vec<f64>, usize) -> RiskResult<()>,
    {
        let paths_per_batch = (BATCH_SIZE / draws_per_path.max(1)).max(1);

        while outcomes.len() < self.simulations {
            self.check_cancelled(outcomes.len())?;
            let n = paths_per_batch.min(self.simulations - outcomes.len());
            draw(outcomes, n)?;
        }
        Ok(())
    }

    /// Sum of `periods` resampled returns. Paths longer than a batch poll
    /// the token every [`BATCH_SIZE`] draws.
    fn bootstrap_path<R: Rng + ?Sized>(
        &self,
        history: &[f64],
        pick: &Uniform<usize>,
        periods: usize,
        completed: usize,
        rng: &mut R,
    ) -> RiskResult<f64> {
        let mut total = 0.0;
        let mut remaining = periods;

        while remaining > 0 {
            let chunk = remaining.min(BATCH_SIZE);
            total += (0..chunk).map(|_| history[pick.sample(&mut *rng)]).sum::<f64>();
            remaining -= chunk;
            if remaining > 0 {
                self.check_cancelled(completed)?;
            }
        }
        Ok(total)
    }

    fn check_cancelled(&self, completed: usize) -> RiskResult<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => {
                debug!(
                    "Monte Carlo simulation cancelled after {} of {} paths",
                    completed, self.simulations
                );
                Err(RiskError::Cancelled)
            }
            _ => Ok(()),
        }
    }

    fn model_name(&self) -> &'static str {
        match self.model {
            PathModel::Normal { .. } => "normal",
            PathModel::Bootstrap(_) => "bootstrap",
        }
    }
}

/// Calculate Monte Carlo VaR with a caller-supplied random source.
///
/// # Arguments
///
/// * `model` - Distribution of one-period returns
/// * `confidence` - Confidence level
/// * `horizon` - Time horizon in days
/// * `simulations` - Number of simulated paths
/// * `rng` - Random source, local to this call
///
/// # Returns
///
/// VaR as a signed loss fraction (positive = loss)
pub fn monte_carlo_var<R: Rng + ?Sized>(
    model: PathModel<'_>,
    confidence: Confidence,
    horizon: Horizon,
    simulations: usize,
    rng: &mut R,
) -> RiskResult<f64> {
    MonteCarloSimulator::new(model, horizon, simulations)?.var(confidence, rng)
}
