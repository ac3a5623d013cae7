//! Cooperative cancellation for long-running simulations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{RiskError, RiskResult};

/// A cheaply cloneable flag that asks an in-flight computation to stop.
///
/// The Monte Carlo simulator polls the token every few thousand draws and
/// returns [`RiskError::Cancelled`](crate::RiskError::Cancelled) once it is set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(RiskError::Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> RiskResult<()> {
        if self.is_cancelled() {
            Err(RiskError::Cancelled)
        } else {
            Ok(())
        }
    }
}
