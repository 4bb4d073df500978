//! Handlers for the severity weight configuration.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use sevdash_core::severity::validate_config;

use crate::error::{AppError, AppResult};
use crate::handlers::json_body;
use crate::response::MessageResponse;
use crate::state::AppState;

pub const READ_CONFIG_FAILED: &str = "Failed to read configuration";
pub const SAVE_CONFIG_FAILED: &str = "Failed to save configuration";

/// GET /config
///
/// Return the stored configuration document.
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let config = state
        .config_store
        .read()
        .await
        .map_err(AppError::storage(READ_CONFIG_FAILED))?;

    Ok(Json(config))
}

/// POST /config
///
/// Validate the four weights and overwrite the stored configuration.
/// An invalid body leaves the stored file untouched.
pub async fn save_config(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let input = json_body(payload)?;
    let validated = validate_config(&input)?;

    state
        .config_store
        .write(&validated.document)
        .await
        .map_err(AppError::storage(SAVE_CONFIG_FAILED))?;

    tracing::info!(
        severity1 = validated.weights.severity1,
        critical = validated.weights.critical,
        warning = validated.weights.warning,
        outage = validated.weights.outage,
        "Configuration saved"
    );

    Ok(Json(MessageResponse::new("Configuration saved successfully")))
}
