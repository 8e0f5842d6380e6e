//! Route definitions for the `/workflows` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::{workflows, workspace};
use crate::state::AppState;

/// Routes mounted at `/workflows`.
///
/// ```text
/// GET  /                                   -> list_workflows
/// POST /                                   -> create_workflow
/// GET  /{id_or_name}/logs                  -> get_workflow_logs
/// GET  /{id_or_name}/status                -> get_workflow_status
/// PUT  /{id_or_name}/status                -> set_workflow_status
/// GET  /{id_or_name}/workspace             -> get_files
/// POST /{id_or_name}/workspace             -> upload_file
/// GET  /{id_or_name}/workspace/{file_name} -> download_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workflows::list_workflows).post(workflows::create_workflow),
        )
        .route("/{id_or_name}/logs", get(workflows::get_workflow_logs))
        .route(
            "/{id_or_name}/status",
            get(workflows::get_workflow_status).put(workflows::set_workflow_status),
        )
        .route(
            "/{id_or_name}/workspace",
            get(workspace::get_files).post(workspace::upload_file),
        )
        .route(
            "/{id_or_name}/workspace/{file_name}",
            get(workspace::download_file),
        )
}
