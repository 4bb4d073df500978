//! Time-based pruning of stored uploads.
//!
//! A file is expired once its last modification is older than the
//! retention window. The sweep checks every file in the upload directory
//! concurrently; a failure on one file is logged and never stops the
//! others.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of days an upload is kept.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// How often the sweep runs after the startup pass.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

const MILLIS_PER_DAY: i64 = 86_400 * 1000;

// ---------------------------------------------------------------------------
// Age rules
// ---------------------------------------------------------------------------

/// Length of the retention window for `days`.
pub fn retention_window(days: u32) -> chrono::Duration {
    chrono::Duration::milliseconds(i64::from(days) * MILLIS_PER_DAY)
}

/// Whether a file modified at `modified` has outlived the window at `now`.
pub fn is_expired(modified: Timestamp, now: Timestamp, days: u32) -> bool {
    now - modified > retention_window(days)
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Outcome counts of one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Regular files looked at (including those that failed).
    pub examined: usize,
    pub deleted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    NotAFile,
    Kept,
    Deleted,
    Failed,
}

/// Delete every file in `dir` older than `days` relative to `now`.
///
/// Only a failure to list `dir` itself is returned as an error.
pub async fn sweep(dir: &Path, days: u32, now: Timestamp) -> std::io::Result<SweepReport> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        paths.push(entry.path());
    }

    let outcomes = join_all(paths.iter().map(|path| check_file(path, days, now))).await;

    let mut report = SweepReport::default();
    for outcome in outcomes {
        match outcome {
            FileOutcome::NotAFile => continue,
            FileOutcome::Kept => {}
            FileOutcome::Deleted => report.deleted += 1,
            FileOutcome::Failed => report.failed += 1,
        }
        report.examined += 1;
    }

    Ok(report)
}

async fn check_file(path: &Path, days: u32, now: Timestamp) -> FileOutcome {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Upload retention: stat failed");
            return FileOutcome::Failed;
        }
    };

    if !metadata.is_file() {
        return FileOutcome::NotAFile;
    }

    let modified = match metadata.modified() {
        Ok(t) => Timestamp::from(t),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Upload retention: no mtime");
            return FileOutcome::Failed;
        }
    };

    if !is_expired(modified, now, days) {
        return FileOutcome::Kept;
    }

    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), %modified, "Upload retention: deleted expired file");
            FileOutcome::Deleted
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Upload retention: delete failed");
            FileOutcome::Failed
        }
    }
}
