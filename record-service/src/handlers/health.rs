use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

const SERVICE_NAME: &str = "record-service";

/// Ping the store, logging the cause on failure. Callers only learn
/// whether it answered.
async fn store_reachable(state: &AppState) -> bool {
    match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Record store unreachable");
            false
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    if store_reachable(&state).await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": "record store unreachable"
            })),
        )
    }
}

pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if store_reachable(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
