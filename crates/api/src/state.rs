use std::sync::Arc;

use flowgate_controller::WorkflowController;
use flowgate_core::user::UserStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (all fields are behind `Arc`). The capabilities
/// are trait objects so tests can inject mocks instead of the production
/// user store and HTTP controller client.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves access tokens into user identities.
    pub user_store: Arc<dyn UserStore>,
    /// Client for the downstream workflow controller.
    pub controller: Arc<dyn WorkflowController>,
}
