use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use job_market::marketplace::{
    marketplace_router, ApiResponse, ApplicationRepository, CandidateRepository, JobRepository,
    MarketplaceServices,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_marketplace_routes<C, J, A>(
    services: Arc<MarketplaceServices<C, J, A>>,
) -> axum::Router
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    marketplace_router(services)
        .route("/", axum::routing::get(index))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Job marketplace API is running",
        "health": "/health",
        "metrics": "/metrics",
    }))
}

pub(crate) async fn healthcheck() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
