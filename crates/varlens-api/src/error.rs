//! API error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use varlens_risk::{ErrorKind, RiskError};

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The engine rejected the request.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// The request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The computation did not finish in time.
    #[error("Computation timed out after {0} ms")]
    Timeout(u64),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body details.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl ApiError {
    /// HTTP status, machine-readable code and engine error class.
    pub fn classify(&self) -> (StatusCode, &'static str, Option<ErrorKind>) {
        match self {
            ApiError::Risk(err) => {
                let kind = err.kind();
                let (status, code) = match kind {
                    ErrorKind::InvalidParameter => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PARAMETER")
                    }
                    ErrorKind::InsufficientData => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_DATA")
                    }
                    ErrorKind::NumericInstability => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "NUMERIC_INSTABILITY")
                    }
                    ErrorKind::Cancelled => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
                };
                (status, code, Some(kind))
            }
            ApiError::InvalidBody(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PARAMETER",
                Some(ErrorKind::InvalidParameter),
            ),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, kind) = self.classify();

        if status.is_server_error() {
            tracing::error!("{}: {}", code, self);
        } else {
            tracing::debug!("{}: {}", code, self);
        }

        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                kind,
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
