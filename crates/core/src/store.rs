//! Flat-file JSON persistence for the configuration and event data.
//!
//! Each store owns one file. Writes are serialized through a mutex and
//! land via write-to-temp then rename, so a reader sees either the old
//! document or the new one.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Suffix appended to the target file name while a write is in flight.
const TEMP_SUFFIX: &str = ".tmp";

/// A single JSON document persisted at a fixed path.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the stored document.
    pub async fn read(&self) -> Result<Value, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored document with `value`, pretty-printed.
    ///
    /// The parent directory is created when missing.
    pub async fn write(&self, value: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(value)?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &body)
            .await
            .map_err(|source| self.write_error(source))?;

        if let Err(source) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.write_error(source));
        }

        tracing::debug!(path = %self.path.display(), bytes = body.len(), "JSON document saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
