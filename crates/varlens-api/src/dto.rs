//! Data transfer objects that have no counterpart in the engine.
//!
//! VaR requests, results and reports travel in their engine shapes
//! ([`VarRequest`](varlens_risk::request::VarRequest),
//! [`VarResult`](varlens_risk::var::VarResult),
//! [`VarReport`](varlens_risk::report::VarReport)).

use serde::{Deserialize, Serialize};
use varlens_risk::series::{PricePoint, ReturnPoint};

/// Dated returns shown when a request does not ask for a preview size.
pub const DEFAULT_PREVIEW_SIZE: usize = 5;

/// Request to convert dated prices into returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsRequest {
    /// Closing prices in any order.
    pub prices: Vec<PricePoint>,

    /// Number of most recent dated returns to echo back.
    #[serde(default)]
    pub preview_size: Option<usize>,
}

/// Returns built from a price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsResponse {
    /// Number of returns.
    pub observations: usize,
    /// Day-over-day returns, oldest first; ready to post to `/api/v1/var`.
    pub returns: Vec<f64>,
    /// The most recent dated returns, oldest first.
    pub preview: Vec<ReturnPoint>,
}
