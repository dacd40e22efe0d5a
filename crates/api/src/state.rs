use std::sync::Arc;

use promptsmith_llm::ChatProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Completion endpoint client.
    pub provider: Arc<dyn ChatProvider>,
}
