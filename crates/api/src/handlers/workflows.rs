//! Handlers for the `/workflows` resource: lifecycle operations proxied to
//! the downstream workflow controller.
//!
//! All endpoints require authentication via [`AuthUser`]. Validation runs
//! before any controller call, so caller-input errors (400/501) always take
//! precedence over downstream failures (500).

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use flowgate_core::error::CoreError;
use flowgate_core::workflow::{parse_create_request, RunStatus};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /workflows
///
/// List all workflows owned by the authenticated user.
pub async fn list_workflows(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let workflows = state.controller.list_workflows(&auth.user).await?;
    Ok(Json(DataResponse { data: workflows }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Query parameters for workflow creation.
#[derive(Debug, Deserialize)]
pub struct CreateWorkflowParams {
    /// Remote-repository specification reference. Recognized but not
    /// supported: its presence short-circuits to 501.
    pub spec: Option<String>,
    /// Workflow name; wins over the body field of the same name.
    pub workflow_name: Option<String>,
}

/// POST /workflows
///
/// Create a workflow from an inline JSON specification. The body envelope
/// must be `{ "workflow": { "specification": ..., "type": ... }, ... }`;
/// see `flowgate_core::workflow::parse_create_request` for the full
/// validation ladder.
pub async fn create_workflow(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CreateWorkflowParams>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if params.spec.is_some() {
        return Err(AppError::Core(CoreError::NotImplemented(
            "workflow specification from a remote repository is not yet supported".into(),
        )));
    }

    let draft = parse_create_request(&body, params.workflow_name.as_deref())?;

    let created = state.controller.create_workflow(&auth.user, &draft).await?;

    tracing::info!(
        workflow_id = %created.workflow_id,
        workflow_name = %created.workflow_name,
        engine = %draft.engine,
        user_id = %auth.user.id,
        "Workflow created",
    );

    Ok(Json(DataResponse { data: created }))
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// GET /workflows/{id_or_name}/logs
///
/// Fetch the aggregated logs of one workflow.
pub async fn get_workflow_logs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let logs = state.controller.get_logs(&auth.user, &id_or_name).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /workflows/{id_or_name}/status
///
/// Report the current lifecycle status of one workflow.
pub async fn get_workflow_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = state.controller.get_status(&auth.user, &id_or_name).await?;
    Ok(Json(DataResponse { data: status }))
}

/// Query parameters for a status transition.
#[derive(Debug, Deserialize)]
pub struct SetStatusParams {
    pub status: Option<String>,
}

/// Optional JSON body for a status transition.
#[derive(Debug, Deserialize)]
pub struct StatusChangeBody {
    /// Engine-specific transition parameters; may be `null`.
    pub parameters: Option<serde_json::Value>,
}

/// PUT /workflows/{id_or_name}/status?status=
///
/// Request a status transition. The gateway does not execute transitions
/// itself; it forwards them and reports the controller's answer.
///
/// A request with no `status` at all is treated as an internal-process
/// failure (500), not a client validation failure. Existing clients depend
/// on that asymmetry.
pub async fn set_workflow_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
    Query(params): Query<SetStatusParams>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let raw = params
        .status
        .ok_or_else(|| AppError::Core(CoreError::Internal("status field is required".into())))?;

    let status: RunStatus = raw
        .parse()
        .map_err(|e: flowgate_core::workflow::UnknownStatus| {
            AppError::Core(CoreError::Internal(e.to_string()))
        })?;

    let parameters = if body.is_empty() {
        None
    } else {
        let parsed: StatusChangeBody = serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("malformed status parameters: {e}")))?;
        parsed.parameters
    };

    let result = state
        .controller
        .set_status(&auth.user, &id_or_name, status, parameters)
        .await?;

    tracing::info!(
        workflow = %id_or_name,
        status = %status,
        user_id = %auth.user.id,
        "Workflow status change forwarded",
    );

    Ok(Json(DataResponse { data: result }))
}
