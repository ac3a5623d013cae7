//! Return construction endpoint.

use axum::{extract::rejection::JsonRejection, Json};
use varlens_risk::series::DatedReturns;

use crate::dto::{ReturnsRequest, ReturnsResponse, DEFAULT_PREVIEW_SIZE};
use crate::error::ApiResult;

/// Convert dated closing prices into day-over-day returns.
pub async fn from_prices(
    payload: Result<Json<ReturnsRequest>, JsonRejection>,
) -> ApiResult<Json<ReturnsResponse>> {
    let Json(request) = payload?;

    let dated = DatedReturns::from_prices(&request.prices)?;
    let preview = dated
        .preview(request.preview_size.unwrap_or(DEFAULT_PREVIEW_SIZE))
        .to_vec();
    let returns: Vec<f64> = dated.to_series().into();

    Ok(Json(ReturnsResponse {
        observations: returns.len(),
        returns,
        preview,
    }))
}
