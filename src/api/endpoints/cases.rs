//! Tracking case endpoints.
//!
//! - `GET  /api/cases`: all cases, most recently updated first
//! - `POST /api/cases`: create a case with its first assessment
//! - `GET  /api/cases/:id`: one case with full history
//! - `POST /api/cases/:id/assessments`: ingest a new assessment
//! - `POST /api/cases/:id/reopen`: start a new episode on a healed case
//! - `POST /api/cases/:id/captures`: assess a capture and ingest the result
//! - `GET  /api/cases/:id/progress`: chart series

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_case_id, ApiContext, CaseView, IngestResponse};
use crate::models::RawAssessment;
use crate::tracking::provider::CaptureRef;
use crate::tracking::stats::Progress;
use crate::tracking::NewCase;

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<CaseView>>, ApiError> {
    let cases = ctx.core.tracking()?.list_cases()?;
    Ok(Json(cases.into_iter().map(CaseView::from).collect()))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewCase>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let Json(new_case) = payload?;
    let outcome = ctx.core.tracking()?.create_case(new_case)?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<CaseView>, ApiError> {
    let id = parse_case_id(&id)?;
    let case = ctx.core.tracking()?.get_case(&id)?;
    Ok(Json(case.into()))
}

pub async fn ingest(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<RawAssessment>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let id = parse_case_id(&id)?;
    let Json(raw) = payload?;
    let outcome = ctx.core.tracking()?.ingest(&id, &raw)?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn reopen(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<RawAssessment>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let id = parse_case_id(&id)?;
    let Json(raw) = payload?;
    let outcome = ctx.core.tracking()?.reopen(&id, &raw)?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn capture(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<CaptureRef>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let id = parse_case_id(&id)?;
    let Json(capture) = payload?;
    let outcome = ctx.core.tracking()?.ingest_capture(&id, &capture)?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn progress(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Progress>, ApiError> {
    let id = parse_case_id(&id)?;
    let progress = ctx.core.tracking()?.progress(&id)?;
    Ok(Json(progress))
}
