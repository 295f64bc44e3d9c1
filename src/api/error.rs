//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::tracking::TrackingError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid assessment: {0}")]
    InvalidAssessment(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Assessment provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidAssessment(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_ASSESSMENT",
                detail,
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::ProviderUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PROVIDER_UNAVAILABLE",
                detail,
            ),
            ApiError::AnalysisFailed(detail) => {
                (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", detail)
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<TrackingError> for ApiError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::InvalidAssessment { reason } => ApiError::InvalidAssessment(reason),
            TrackingError::CaseNotFound(id) => ApiError::NotFound(format!("case {id}")),
            TrackingError::ProviderUnavailable(detail) => ApiError::ProviderUnavailable(detail),
            TrackingError::AnalysisFailed(detail) => ApiError::AnalysisFailed(detail),
            TrackingError::Persistence(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
