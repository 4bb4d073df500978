//! Periodic cleanup of old CSV uploads.
//!
//! Sweeps the upload directory once at startup and then every
//! [`SWEEP_INTERVAL`], deleting files older than the retention period.

use std::path::PathBuf;

use chrono::Utc;
use sevdash_core::retention::{self, SweepReport, SWEEP_INTERVAL};
use tokio_util::sync::CancellationToken;

/// Run the upload retention loop until `cancel` is triggered.
///
/// The first interval tick completes immediately, which gives the startup
/// sweep.
pub async fn run(upload_dir: PathBuf, retention_days: u32, cancel: CancellationToken) {
    tracing::info!(
        dir = %upload_dir.display(),
        retention_days,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Upload retention job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Upload retention job stopping");
                break;
            }
            _ = interval.tick() => {
                sweep_once(&upload_dir, retention_days).await;
            }
        }
    }
}

/// One sweep of `upload_dir`, logging the outcome.
///
/// Returns `None` when the directory could not be listed.
pub async fn sweep_once(upload_dir: &std::path::Path, retention_days: u32) -> Option<SweepReport> {
    match retention::sweep(upload_dir, retention_days, Utc::now()).await {
        Ok(report) => {
            if report.deleted > 0 || report.failed > 0 {
                tracing::info!(
                    examined = report.examined,
                    deleted = report.deleted,
                    failed = report.failed,
                    "Upload retention: sweep finished"
                );
            } else {
                tracing::debug!(examined = report.examined, "Upload retention: nothing to purge");
            }
            Some(report)
        }
        Err(e) => {
            tracing::error!(
                dir = %upload_dir.display(),
                error = %e,
                "Upload retention: failed to list upload directory"
            );
            None
        }
    }
}
