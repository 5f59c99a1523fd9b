use std::sync::Arc;

use crate::config::ServerConfig;
use crate::flow::manager::FlowManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: onboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Active onboarding flow sessions (one per email).
    pub flows: Arc<FlowManager>,
}
