//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};
use crate::horizon::Horizon;

/// Default number of Monte Carlo paths when a request does not specify one.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Upper bound on Monte Carlo paths accepted from a request.
pub const DEFAULT_MAX_SIMULATIONS: usize = 5_000_000;

/// Upper bound on resampled returns (paths × horizon days) for a bootstrap run.
pub const DEFAULT_MAX_BOOTSTRAP_DRAWS: usize = 250_000_000;

/// How multi-day historical returns are cut from a daily series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoricalWindows {
    /// Every run of n consecutive days (step of one day).
    #[default]
    Overlapping,
    /// Disjoint runs of n days, anchored at the most recent observation.
    NonOverlapping,
}

impl HistoricalWindows {
    /// Fewest daily returns that yield the two n-day outcomes a quantile needs.
    pub fn min_observations(self, horizon: Horizon) -> usize {
        match self {
            Self::Overlapping => horizon.periods() + 1,
            Self::NonOverlapping => horizon.periods() * 2,
        }
    }
}

/// Stateless settings shared by every evaluation of a [`VarEngine`](crate::engine::VarEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo paths used when a request omits `simulationCount`.
    pub default_simulations: usize,

    /// Largest `simulationCount` a request may ask for.
    pub max_simulations: usize,

    /// Largest `simulationCount × horizonDays` a bootstrap request may ask for.
    pub max_bootstrap_draws: usize,

    /// Seed used for Monte Carlo when a request carries none
    /// (None = fresh entropy per evaluation).
    pub seed: Option<u64>,

    /// Multi-day window scheme for historical simulation.
    pub historical_windows: HistoricalWindows,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_simulations: DEFAULT_SIMULATIONS,
            max_simulations: DEFAULT_MAX_SIMULATIONS,
            max_bootstrap_draws: DEFAULT_MAX_BOOTSTRAP_DRAWS,
            seed: None,
            historical_windows: HistoricalWindows::default(),
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default Monte Carlo path count.
    #[must_use]
    pub fn with_default_simulations(mut self, simulations: usize) -> Self {
        self.default_simulations = simulations;
        self
    }

    /// Sets the Monte Carlo path limit.
    #[must_use]
    pub fn with_max_simulations(mut self, simulations: usize) -> Self {
        self.max_simulations = simulations;
        self
    }

    /// Sets the bootstrap draw limit.
    #[must_use]
    pub fn with_max_bootstrap_draws(mut self, draws: usize) -> Self {
        self.max_bootstrap_draws = draws;
        self
    }

    /// Sets the fallback Monte Carlo seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the historical window scheme.
    #[must_use]
    pub fn with_historical_windows(mut self, windows: HistoricalWindows) -> Self {
        self.historical_windows = windows;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RiskResult<()> {
        if self.default_simulations == 0 {
            return Err(RiskError::invalid_parameter(
                "default_simulations",
                "must be positive",
            ));
        }
        if self.max_simulations < self.default_simulations {
            return Err(RiskError::invalid_parameter(
                "max_simulations",
                format!(
                    "must be at least default_simulations ({}), got {}",
                    self.default_simulations, self.max_simulations
                ),
            ));
        }
        if self.max_bootstrap_draws == 0 {
            return Err(RiskError::invalid_parameter(
                "max_bootstrap_draws",
                "must be positive",
            ));
        }
        Ok(())
    }
}
