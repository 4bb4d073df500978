//! CSV upload rules: accepted types, size cap and stored file naming.

use crate::types::EpochMillis;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Default upload size cap (2 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Default directory for stored uploads, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// MIME type accepted without looking at the file name.
pub const CSV_MIME: &str = "text/csv";

const CSV_EXTENSION: &str = ".csv";

// ---------------------------------------------------------------------------
// Type check
// ---------------------------------------------------------------------------

/// Whether an upload counts as CSV.
///
/// Accepted when the MIME essence is `text/csv` (parameters such as
/// `charset` are ignored) or the file name ends in `.csv`, in any case.
pub fn is_csv(content_type: Option<&str>, filename: &str) -> bool {
    let mime_matches = content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CSV_MIME));

    mime_matches || filename.to_ascii_lowercase().ends_with(CSV_EXTENSION)
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Reduce a client-supplied file name to its final path component.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(original: &str) -> Option<String> {
    let basename = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original)
        .trim();

    match basename {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Stored name of an upload: `<epoch-ms>-<original-name>`.
///
/// # Examples
///
/// ```
/// use sevdash_core::upload::stored_filename;
///
/// assert_eq!(stored_filename(1700000000000, "report.csv"), "1700000000000-report.csv");
/// ```
pub fn stored_filename(uploaded_at: EpochMillis, original: &str) -> String {
    format!("{uploaded_at}-{original}")
}
