pub mod config;
pub mod data;
pub mod upload;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body, turning extractor rejections into JSON 400s.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
