pub mod config;
pub mod data;
pub mod health;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /config     GET read, POST save (validated weights)
/// /data       GET read, POST save (any JSON)
/// /upload     POST single CSV (multipart field `file`)
/// ```
///
/// `max_upload_bytes` sizes the request body limit of the upload route.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(config::router())
        .merge(data::router())
        .merge(upload::router(max_upload_bytes))
}
