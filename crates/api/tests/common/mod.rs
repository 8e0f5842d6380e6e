//! Shared test harness: mock controller, static user store, and request
//! helpers driving the real router via `tower::ServiceExt::oneshot`.

// Each test binary compiles its own copy and uses a subset of the helpers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use flowgate_api::config::ServerConfig;
use flowgate_api::router::build_app_router;
use flowgate_api::state::AppState;
use flowgate_controller::types::{
    CreatedWorkflow, WorkflowLogs, WorkflowStatus, WorkflowSummary, WorkspaceFile,
};
use flowgate_controller::{ControllerError, WorkflowController};
use flowgate_core::user::{InMemoryUserStore, User};
use flowgate_core::workflow::{RunStatus, WorkflowDraft};

/// The access token the test user store resolves.
pub const TEST_TOKEN: &str = "test-access-token";

/// Fixed id of the test user.
pub fn test_user_id() -> Uuid {
    Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        controller_url: "http://controller.invalid".to_string(),
        api_tokens: vec![(TEST_TOKEN.to_string(), test_user_id())],
    }
}

/// A controller double: either answers every call with canned data or
/// fails every call with a connection-style error.
///
/// Uploads are recorded so tests can assert the bytes were forwarded.
#[derive(Default)]
pub struct MockController {
    fail: bool,
    pub uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MockController {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn check(&self) -> Result<(), ControllerError> {
        if self.fail {
            Err(ControllerError::Format(
                "simulated controller failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl WorkflowController for MockController {
    async fn list_workflows(&self, _user: &User) -> Result<Vec<WorkflowSummary>, ControllerError> {
        self.check()?;
        Ok(vec![WorkflowSummary {
            id: Uuid::new_v4(),
            name: "test.1".to_string(),
            status: RunStatus::Running,
            created: chrono::Utc::now(),
        }])
    }

    async fn create_workflow(
        &self,
        _user: &User,
        draft: &WorkflowDraft,
    ) -> Result<CreatedWorkflow, ControllerError> {
        self.check()?;
        Ok(CreatedWorkflow {
            workflow_id: Uuid::new_v4(),
            workflow_name: draft.name.clone().unwrap_or_else(|| "workflow.1".into()),
        })
    }

    async fn get_logs(
        &self,
        _user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowLogs, ControllerError> {
        self.check()?;
        Ok(WorkflowLogs {
            workflow_id: id_or_name.to_string(),
            logs: "step 1 done\n".to_string(),
        })
    }

    async fn get_status(
        &self,
        _user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowStatus, ControllerError> {
        self.check()?;
        Ok(WorkflowStatus {
            workflow_id: id_or_name.to_string(),
            status: RunStatus::Running,
        })
    }

    async fn set_status(
        &self,
        _user: &User,
        id_or_name: &str,
        status: RunStatus,
        _parameters: Option<serde_json::Value>,
    ) -> Result<WorkflowStatus, ControllerError> {
        self.check()?;
        Ok(WorkflowStatus {
            workflow_id: id_or_name.to_string(),
            status,
        })
    }

    async fn list_files(
        &self,
        _user: &User,
        _id_or_name: &str,
    ) -> Result<Vec<WorkspaceFile>, ControllerError> {
        self.check()?;
        Ok(vec![WorkspaceFile {
            name: "results.txt".to_string(),
            last_modified: chrono::Utc::now(),
            size: 42,
        }])
    }

    async fn upload_file(
        &self,
        _user: &User,
        id_or_name: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), ControllerError> {
        self.check()?;
        self.uploads.lock().unwrap().push((
            id_or_name.to_string(),
            file_name.to_string(),
            content,
        ));
        Ok(())
    }

    async fn download_file(
        &self,
        _user: &User,
        _id_or_name: &str,
        _file_name: &str,
    ) -> Result<Vec<u8>, ControllerError> {
        self.check()?;
        Ok(b"Download this data.".to_vec())
    }
}

/// Build the full application router with all middleware layers, using the
/// given controller double. This mirrors the router construction in
/// `main.rs` so integration tests exercise the same stack production uses.
pub fn build_test_app(controller: Arc<dyn WorkflowController>) -> Router {
    let config = test_config();
    let user_store = InMemoryUserStore::from_pairs(config.api_tokens.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        user_store: Arc::new(user_store),
        controller,
    };

    build_app_router(state, &config)
}

/// Router wired to a controller that answers every call.
pub fn test_app() -> Router {
    build_test_app(Arc::new(MockController::ok()))
}

/// Router wired to a controller that fails every call.
pub fn failing_app() -> Router {
    build_test_app(Arc::new(MockController::failing()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn put_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a multipart body with a single field carrying a file payload.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field_name: &str,
    file_name: &str,
    payload: &[u8],
) -> Response<Body> {
    let boundary = "flowgate-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

/// Assert a response is an error with the expected status and `code` field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
}
