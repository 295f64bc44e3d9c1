//! Single-shot analysis endpoints.
//!
//! - `POST /api/analyze`: assess one capture outside any case
//! - `GET  /api/analyses`: analysis history, newest first
//! - `GET  /api/analyses/summary`: risk breakdown of the last 7 days

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::AnalysisRecord;
use crate::tracking::provider::CaptureRef;
use crate::tracking::stats::WeeklySummary;

pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<CaptureRef>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalysisRecord>), ApiError> {
    let Json(capture) = payload?;
    let record = ctx.core.tracking()?.analyze(&capture)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn history(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let records = ctx.core.tracking()?.list_analyses()?;
    Ok(Json(records))
}

pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<WeeklySummary>, ApiError> {
    let now = chrono::Local::now().naive_local();
    let summary = ctx.core.tracking()?.weekly_summary(now)?;
    Ok(Json(summary))
}
