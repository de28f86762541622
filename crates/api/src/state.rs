use std::sync::Arc;

use userhub_events::EventPublisher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: userhub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event publisher for post-commit domain events.
    pub publisher: Arc<EventPublisher>,
}
