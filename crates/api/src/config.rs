use std::path::PathBuf;

use sevdash_core::retention::DEFAULT_RETENTION_DAYS;
use sevdash_core::upload::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_DIR};

/// Wildcard accepted in `CORS_ORIGINS` to allow any origin.
pub const ANY_ORIGIN: &str = "*";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Paths are
/// relative to the working directory unless given absolute.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Days an upload is kept before the sweep deletes it (default: `7`).
    pub upload_retention_days: u32,
    /// Largest accepted upload in bytes (default: 2 MiB).
    pub max_upload_bytes: usize,
    /// Severity weight configuration file.
    pub config_path: PathBuf,
    /// Event data file.
    pub data_path: PathBuf,
    /// Directory holding stored uploads.
    pub upload_dir: PathBuf,
    /// Frontend asset roots, tried in order.
    pub static_dirs: Vec<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default              |
    /// |-------------------------|----------------------|
    /// | `HOST`                  | `0.0.0.0`            |
    /// | `PORT`                  | `3000`               |
    /// | `CORS_ORIGINS`          | `*`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                 |
    /// | `UPLOAD_RETENTION_DAYS` | `7`                  |
    /// | `MAX_UPLOAD_BYTES`      | `2097152`            |
    /// | `CONFIG_PATH`           | `config/config.json` |
    /// | `DATA_PATH`             | `data/data.json`     |
    /// | `UPLOAD_DIR`            | `uploads`            |
    /// | `STATIC_DIRS`           | `public`             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| ANY_ORIGIN.into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_retention_days: u32 = std::env::var("UPLOAD_RETENTION_DAYS")
            .map(|v| v.parse().expect("UPLOAD_RETENTION_DAYS must be a valid u32"))
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let config_path = path_var("CONFIG_PATH", "config/config.json");
        let data_path = path_var("DATA_PATH", "data/data.json");
        let upload_dir = path_var("UPLOAD_DIR", DEFAULT_UPLOAD_DIR);

        let static_dirs = split_list(
            &std::env::var("STATIC_DIRS").unwrap_or_else(|_| "public".into()),
        )
        .into_iter()
        .map(PathBuf::from)
        .collect();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_retention_days,
            max_upload_bytes,
            config_path,
            data_path,
            upload_dir,
            static_dirs,
        }
    }

    /// Whether CORS is open to every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn wildcard_detected() {
        let mut config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![ANY_ORIGIN.to_string()],
            request_timeout_secs: 30,
            upload_retention_days: DEFAULT_RETENTION_DAYS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            config_path: PathBuf::from("config/config.json"),
            data_path: PathBuf::from("data/data.json"),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            static_dirs: vec![PathBuf::from("public")],
        };
        assert!(config.allows_any_origin());

        config.cors_origins = vec!["http://localhost:5173".to_string()];
        assert!(!config.allows_any_origin());
    }
}
