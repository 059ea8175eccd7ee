use std::sync::Arc;

use podium_db::store::RecordStore;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (users, sessions, attachment lookups).
    pub pool: podium_db::DbPool,
    /// Presentation record store (SQL-backed in production).
    pub store: Arc<dyn RecordStore>,
    /// Attachment file storage.
    pub uploads: Arc<UploadStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
