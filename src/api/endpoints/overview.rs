//! `GET /api/overview`: counters for the tracking screen header.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::tracking::stats::Overview;

pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<Overview>, ApiError> {
    let overview = ctx.core.tracking()?.overview()?;
    Ok(Json(overview))
}
