//! Handler for CSV uploads.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sevdash_core::upload::{is_csv, sanitize_filename, stored_filename, UPLOAD_FIELD};

use crate::error::{AppError, AppResult};
use crate::response::UploadResponse;
use crate::state::AppState;

pub const ONLY_CSV_MESSAGE: &str = "Only CSV files are allowed";
pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const SINGLE_FILE_MESSAGE: &str = "Only one file may be uploaded";

/// POST /upload
///
/// Accept a single CSV in the multipart field `file` and store it as
/// `<epoch-ms>-<original-name>` in the upload directory. Other fields
/// and non-file parts are ignored.
pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let max_bytes = state.config.max_upload_bytes;
    let mut stored: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(original) = field.file_name().and_then(sanitize_filename) else {
            continue;
        };

        if !is_csv(field.content_type(), &original) {
            return Err(AppError::BadRequest(ONLY_CSV_MESSAGE.to_string()));
        }
        if stored.is_some() {
            return Err(AppError::BadRequest(SINGLE_FILE_MESSAGE.to_string()));
        }

        let mut contents: Vec<u8> = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if contents.len() + chunk.len() > max_bytes {
                return Err(AppError::FileTooLarge);
            }
            contents.extend_from_slice(&chunk);
        }

        let filename = stored_filename(Utc::now().timestamp_millis(), &original);
        let upload_dir = &state.config.upload_dir;

        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(upload_dir.join(&filename), &contents)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store {filename}: {e}")))?;

        tracing::info!(%filename, bytes = contents.len(), "CSV upload stored");
        stored = Some(filename);
    }

    let filename = stored.ok_or_else(|| AppError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        filename,
    }))
}

/// Map a multipart stream error, treating a tripped body limit as an
/// oversized file.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}
