//! Application state.

use std::sync::Arc;
use std::time::Duration;

use varlens_risk::cancel::CancellationToken;
use varlens_risk::engine::VarEngine;
use varlens_risk::RiskResult;

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The stateless engine.
    pub engine: Arc<VarEngine>,

    /// Upper bound on a single estimation.
    pub timeout: Duration,
}

impl AppState {
    /// Create state from an engine and timeout.
    pub fn new(engine: VarEngine, timeout: Duration) -> Self {
        Self {
            engine: Arc::new(engine),
            timeout,
        }
    }

    /// Create state from server configuration.
    pub fn from_config(config: &ServerConfig) -> ApiResult<Self> {
        let engine = VarEngine::new(config.engine.clone())?;
        Ok(Self::new(engine, config.timeout()))
    }

    /// Runs `job` on the blocking pool, giving up after the configured timeout.
    ///
    /// On timeout the job's cancellation token is triggered so a Monte Carlo
    /// run stops at its next batch boundary instead of running to completion.
    pub async fn run_blocking<T, F>(&self, job: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&VarEngine, CancellationToken) -> RiskResult<T> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let token = CancellationToken::new();
        let worker_token = token.clone();

        let handle = tokio::task::spawn_blocking(move || job(&engine, worker_token));

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result.map_err(ApiError::from),
            Ok(Err(join_err)) => Err(ApiError::Internal(join_err.to_string())),
            Err(_) => {
                token.cancel();
                let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!("estimation exceeded {} ms, cancelling", ms);
                Err(ApiError::Timeout(ms))
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(VarEngine::default(), Duration::from_secs(10))
    }
}
