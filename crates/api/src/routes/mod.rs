//! Route table for the gateway.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod workflows;

/// All authenticated API routes, mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Workflow lifecycle + per-workflow workspace.
        .nest("/workflows", workflows::router())
}
