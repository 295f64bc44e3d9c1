//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the host API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/cases",
            get(endpoints::cases::list).post(endpoints::cases::create),
        )
        .route("/cases/:id", get(endpoints::cases::detail))
        .route("/cases/:id/assessments", post(endpoints::cases::ingest))
        .route("/cases/:id/reopen", post(endpoints::cases::reopen))
        .route("/cases/:id/captures", post(endpoints::cases::capture))
        .route("/cases/:id/progress", get(endpoints::cases::progress))
        .route("/overview", get(endpoints::overview::summary))
        .route("/analyze", post(endpoints::analysis::analyze))
        .route("/analyses", get(endpoints::analysis::history))
        .route("/analyses/summary", get(endpoints::analysis::summary))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
