//! VaR endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use varlens_risk::report::{ReportRequest, VarReport};
use varlens_risk::request::VarRequest;
use varlens_risk::var::VarResult;

use crate::error::ApiResult;
use crate::state::AppState;

/// Single VaR estimate.
pub async fn compute(
    State(state): State<AppState>,
    payload: Result<Json<VarRequest>, JsonRejection>,
) -> ApiResult<Json<VarResult>> {
    let Json(request) = payload?;
    tracing::debug!(
        "VaR request: {} at {} over {} returns, horizon {}d",
        request.method,
        request.confidence,
        request.returns.len(),
        request.horizon_days
    );

    let result = state
        .run_blocking(move |engine, token| engine.evaluate_cancellable(request, token))
        .await?;

    tracing::info!("{}", result);
    Ok(Json(result))
}

/// Every method at each requested confidence level.
pub async fn report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<Json<VarReport>> {
    let Json(request) = payload?;

    let report = state
        .run_blocking(move |engine, token| VarReport::build_cancellable(engine, &request, &token))
        .await?;

    tracing::info!(
        "VaR report: {} rows over {} returns",
        report.rows.len(),
        report.observations
    );
    Ok(Json(report))
}
