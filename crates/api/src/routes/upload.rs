use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Room left for multipart boundaries and part headers on top of the
/// file size cap, so the handler's own size check fires first.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// ```text
/// POST /upload -> upload_csv
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/upload",
        post(upload::upload_csv)
            .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD_BYTES)),
    )
}
