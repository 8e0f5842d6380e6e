//! Wire types exchanged with the workflow controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flowgate_core::workflow::RunStatus;

/// One workflow row in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: Uuid,
    pub name: String,
    pub status: RunStatus,
    pub created: DateTime<Utc>,
}

/// Identifiers assigned to a newly created workflow.
///
/// Both the generated UUID and the (possibly controller-generated) name are
/// valid lookup keys for subsequent calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedWorkflow {
    pub workflow_id: Uuid,
    pub workflow_name: String,
}

/// Aggregated log text for one workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowLogs {
    pub workflow_id: String,
    pub logs: String,
}

/// Current lifecycle status of one workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub workflow_id: String,
    pub status: RunStatus,
}

/// One entry in a workflow's workspace listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceFile {
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub size: u64,
}
