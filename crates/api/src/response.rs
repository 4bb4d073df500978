//! Shared response bodies for API handlers.
//!
//! Success bodies are flat JSON objects with a human-readable `message`;
//! use these types instead of ad-hoc `serde_json::json!` literals.

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` confirmation body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned after a successful CSV upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Name the file was stored under.
    pub filename: String,
}
