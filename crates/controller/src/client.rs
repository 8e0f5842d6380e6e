//! The [`WorkflowController`] capability and its HTTP implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use flowgate_core::user::User;
use flowgate_core::workflow::{RunStatus, WorkflowDraft};

use crate::error::ControllerError;
use crate::types::{
    CreatedWorkflow, WorkflowLogs, WorkflowStatus, WorkflowSummary, WorkspaceFile,
};

/// Operations the gateway needs from the downstream workflow controller.
///
/// The gateway performs no retries and sets no timeouts here; transient
/// failure handling and deadlines belong to the implementation.
#[async_trait]
pub trait WorkflowController: Send + Sync {
    /// List all workflows owned by `user`.
    async fn list_workflows(&self, user: &User) -> Result<Vec<WorkflowSummary>, ControllerError>;

    /// Create a workflow from a validated draft.
    async fn create_workflow(
        &self,
        user: &User,
        draft: &WorkflowDraft,
    ) -> Result<CreatedWorkflow, ControllerError>;

    /// Fetch the aggregated logs of one workflow.
    async fn get_logs(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowLogs, ControllerError>;

    /// Fetch the current status of one workflow.
    async fn get_status(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowStatus, ControllerError>;

    /// Request a status transition. `parameters` is forwarded opaquely.
    async fn set_status(
        &self,
        user: &User,
        id_or_name: &str,
        status: RunStatus,
        parameters: Option<serde_json::Value>,
    ) -> Result<WorkflowStatus, ControllerError>;

    /// List the files in a workflow's workspace.
    async fn list_files(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<Vec<WorkspaceFile>, ControllerError>;

    /// Store a file in a workflow's workspace.
    async fn upload_file(
        &self,
        user: &User,
        id_or_name: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), ControllerError>;

    /// Retrieve a file from a workflow's workspace.
    async fn download_file(
        &self,
        user: &User,
        id_or_name: &str,
        file_name: &str,
    ) -> Result<Vec<u8>, ControllerError>;
}

/// HTTP client for the workflow controller's REST API.
pub struct HttpWorkflowController {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWorkflowController {
    /// Create a client for the controller at `base_url`
    /// (e.g. `http://workflow-controller:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling and for configuring timeouts at one place).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a 2xx JSON body, classifying non-2xx and decode failures.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ControllerError> {
        let response = Self::ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ControllerError::Format(e.to_string()))
    }

    /// Check the status code, discarding the body on success.
    async fn check_status(response: reqwest::Response) -> Result<(), ControllerError> {
        Self::ensure_success(response).await.map(|_| ())
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ControllerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ControllerError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl WorkflowController for HttpWorkflowController {
    async fn list_workflows(&self, user: &User) -> Result<Vec<WorkflowSummary>, ControllerError> {
        let response = self
            .client
            .get(self.url("/workflows"))
            .query(&[("user", user.id.to_string())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn create_workflow(
        &self,
        user: &User,
        draft: &WorkflowDraft,
    ) -> Result<CreatedWorkflow, ControllerError> {
        let body = serde_json::json!({
            "name": draft.name,
            "type": draft.engine,
            "specification": draft.specification,
        });

        let response = self
            .client
            .post(self.url("/workflows"))
            .query(&[("user", user.id.to_string())])
            .json(&body)
            .send()
            .await?;

        let created: CreatedWorkflow = Self::parse_response(response).await?;
        tracing::debug!(
            workflow_id = %created.workflow_id,
            workflow_name = %created.workflow_name,
            "Controller accepted workflow",
        );
        Ok(created)
    }

    async fn get_logs(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowLogs, ControllerError> {
        let response = self
            .client
            .get(self.url(&format!("/workflows/{id_or_name}/logs")))
            .query(&[("user", user.id.to_string())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_status(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<WorkflowStatus, ControllerError> {
        let response = self
            .client
            .get(self.url(&format!("/workflows/{id_or_name}/status")))
            .query(&[("user", user.id.to_string())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn set_status(
        &self,
        user: &User,
        id_or_name: &str,
        status: RunStatus,
        parameters: Option<serde_json::Value>,
    ) -> Result<WorkflowStatus, ControllerError> {
        let body = serde_json::json!({
            "status": status,
            "parameters": parameters,
        });

        let response = self
            .client
            .put(self.url(&format!("/workflows/{id_or_name}/status")))
            .query(&[("user", user.id.to_string())])
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn list_files(
        &self,
        user: &User,
        id_or_name: &str,
    ) -> Result<Vec<WorkspaceFile>, ControllerError> {
        let response = self
            .client
            .get(self.url(&format!("/workflows/{id_or_name}/workspace")))
            .query(&[("user", user.id.to_string())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn upload_file(
        &self,
        user: &User,
        id_or_name: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), ControllerError> {
        let response = self
            .client
            .post(self.url(&format!("/workflows/{id_or_name}/workspace")))
            .query(&[
                ("user", user.id.to_string()),
                ("file_name", file_name.to_string()),
            ])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await?;

        Self::check_status(response).await?;
        tracing::debug!(workflow = %id_or_name, file_name, "Controller stored workspace file");
        Ok(())
    }

    async fn download_file(
        &self,
        user: &User,
        id_or_name: &str,
        file_name: &str,
    ) -> Result<Vec<u8>, ControllerError> {
        let response = self
            .client
            .get(self.url(&format!("/workflows/{id_or_name}/workspace/{file_name}")))
            .query(&[("user", user.id.to_string())])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
