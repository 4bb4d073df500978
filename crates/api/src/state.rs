use std::sync::Arc;

use sevdash_core::store::JsonFileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (paths, limits).
    pub config: Arc<ServerConfig>,
    /// Severity weight configuration document.
    pub config_store: Arc<JsonFileStore>,
    /// Free-form event data document.
    pub data_store: Arc<JsonFileStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let config_store = Arc::new(JsonFileStore::new(config.config_path.clone()));
        let data_store = Arc::new(JsonFileStore::new(config.data_path.clone()));
        Self {
            config: Arc::new(config),
            config_store,
            data_store,
        }
    }
}
