//! Handlers for a workflow's workspace: file listing, upload, download.
//!
//! All endpoints require authentication via [`AuthUser`]. The workspace
//! itself lives downstream; these handlers only proxy bytes.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field name the upload payload must arrive under.
const UPLOAD_FIELD: &str = "file_content";

// ---------------------------------------------------------------------------
// List files
// ---------------------------------------------------------------------------

/// GET /workflows/{id_or_name}/workspace
///
/// List the files in a workflow's workspace.
pub async fn get_files(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let files = state.controller.list_files(&auth.user, &id_or_name).await?;
    Ok(Json(DataResponse { data: files }))
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Query parameters for the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub file_name: Option<String>,
}

/// Typed response for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub file_name: String,
    pub bytes_received: usize,
}

/// POST /workflows/{id_or_name}/workspace?file_name=
///
/// Store a file in a workflow's workspace. The payload must arrive as a
/// multipart field named exactly `file_content`; any other field name is a
/// bad request, as is a missing or empty `file_name`. A failed upload never
/// reports success with missing data.
pub async fn upload_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let file_name = params
        .file_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("file_name parameter is required".into()))?;

    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some(UPLOAD_FIELD) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                content = Some(bytes.to_vec());
            }
            // Unexpected field names are not silently skipped; the caller
            // most likely misnamed the payload field.
            other => {
                return Err(AppError::BadRequest(format!(
                    "unexpected upload field {:?}, expected {UPLOAD_FIELD:?}",
                    other.unwrap_or("")
                )));
            }
        }
    }

    let content = content.ok_or_else(|| {
        AppError::BadRequest(format!("missing upload field {UPLOAD_FIELD:?}"))
    })?;

    let bytes_received = content.len();

    state
        .controller
        .upload_file(&auth.user, &id_or_name, &file_name, content)
        .await?;

    tracing::info!(
        workflow = %id_or_name,
        file_name = %file_name,
        bytes_received,
        user_id = %auth.user.id,
        "Workspace file uploaded",
    );

    Ok(Json(DataResponse {
        data: UploadResult {
            file_name,
            bytes_received,
        },
    }))
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// GET /workflows/{id_or_name}/workspace/{file_name}
///
/// Retrieve a file from a workflow's workspace as raw bytes.
pub async fn download_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id_or_name, file_name)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let bytes = state
        .controller
        .download_file(&auth.user, &id_or_name, &file_name)
        .await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];

    Ok((headers, bytes))
}
