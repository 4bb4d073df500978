//! Handlers for the free-form event data document.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::json_body;
use crate::response::MessageResponse;
use crate::state::AppState;

pub const READ_DATA_FAILED: &str = "Failed to read data";
pub const SAVE_DATA_FAILED: &str = "Failed to save data";

/// GET /data
pub async fn get_data(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let data = state
        .data_store
        .read()
        .await
        .map_err(AppError::storage(READ_DATA_FAILED))?;

    Ok(Json(data))
}

/// POST /data
///
/// Store any JSON value as-is, creating the data directory if needed.
pub async fn save_data(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let input = json_body(payload)?;

    state
        .data_store
        .write(&input)
        .await
        .map_err(AppError::storage(SAVE_DATA_FAILED))?;

    tracing::info!(path = %state.data_store.path().display(), "Event data saved");

    Ok(Json(MessageResponse::new("Data saved successfully")))
}
