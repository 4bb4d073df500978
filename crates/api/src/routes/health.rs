use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the upload directory exists.
    pub uploads_ready: bool,
}

/// GET /health -- returns service and upload storage health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uploads_ready = tokio::fs::metadata(&state.config.upload_dir)
        .await
        .is_ok_and(|m| m.is_dir());

    let status = if uploads_ready { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uploads_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
