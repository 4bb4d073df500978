use axum::routing::get;
use axum::Router;

use crate::handlers::data;
use crate::state::AppState;

/// ```text
/// GET  /data -> get_data
/// POST /data -> save_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/data", get(data::get_data).post(data::save_data))
}
