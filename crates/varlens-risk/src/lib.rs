//! # varlens-risk
//!
//! Value at Risk estimation from a series of historical returns.
//!
//! This crate provides:
//!
//! - **Confidence**: Confidence levels and their standard normal critical values
//! - **Horizon**: Square-root-of-time scaling of one-period statistics
//! - **VaR estimators**: Historical simulation, parametric (normal) and Monte Carlo
//! - **Engine**: Request validation and dispatch to the estimator for each method
//! - **Report**: Every method tabulated at a set of confidence levels
//!
//! VaR is always reported as a non-negative loss expressed as a fraction of
//! portfolio value.
//!
//! ## Example
//!
//! ```rust
//! use varlens_risk::prelude::*;
//!
//! let engine = VarEngine::default();
//! let request = VarRequest::parametric(0.0, 0.02, 0.95);
//!
//! let result = engine.evaluate(request).unwrap();
//! assert!((result.value - 0.0329).abs() < 1e-4);
//! ```

#![warn(missing_docs)]

pub mod cancel;
pub mod config;
pub mod confidence;
pub mod engine;
mod error;
pub mod horizon;
pub mod report;
pub mod request;
pub mod series;
pub mod var;

pub use error::{ErrorKind, RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cancel::CancellationToken;
    pub use crate::config::{EngineConfig, HistoricalWindows};
    pub use crate::confidence::Confidence;
    pub use crate::engine::VarEngine;
    pub use crate::horizon::Horizon;
    pub use crate::report::{ReportRequest, ReportRow, VarReport};
    pub use crate::request::{Estimator, NormalParams, Sampling, ValidatedRequest, VarRequest};
    pub use crate::series::{DatedReturns, PricePoint, ReturnPoint, ReturnSeries};
    pub use crate::var::{VarMethod, VarResult};
    pub use crate::{ErrorKind, RiskError, RiskResult};
}
