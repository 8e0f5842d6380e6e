//! Workflow domain types and create-request validation.
//!
//! The create endpoint historically accepted loosely-typed JSON, so the
//! validation here works over `serde_json::Value` and classifies each
//! failure into the error class callers observe as a status code:
//!
//! * unreadable / absent body        -> [`CoreError::Internal`]  (500)
//! * wrong envelope key              -> [`CoreError::Validation`] (400)
//! * unknown engine type             -> [`CoreError::Internal`]  (500)
//! * name colliding with a UUID      -> [`CoreError::Validation`] (400)
//!
//! The 500-vs-400 split is asymmetric on purpose: it mirrors the behavior
//! existing clients depend on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Registered workflow-engine identifiers.
///
/// A specification names the engine that interprets it; anything outside
/// this set is rejected before the controller is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Serial,
    Yadage,
    Cwl,
}

impl EngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::Serial => "serial",
            EngineType::Yadage => "yadage",
            EngineType::Cwl => "cwl",
        }
    }
}

impl FromStr for EngineType {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(EngineType::Serial),
            "yadage" => Ok(EngineType::Yadage),
            "cwl" => Ok(EngineType::Cwl),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown workflow engine: {0}")]
pub struct UnknownEngine(pub String);

/// Lifecycle status of a workflow, as reported and driven through the
/// downstream controller. The gateway only forwards transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Created,
    Running,
    Finished,
    Failed,
    Stopped,
    Queued,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Created => "created",
            RunStatus::Running => "running",
            RunStatus::Finished => "finished",
            RunStatus::Failed => "failed",
            RunStatus::Stopped => "stopped",
            RunStatus::Queued => "queued",
        }
    }
}

impl FromStr for RunStatus {
    type Err = UnknownStatus;

    /// Accepts the lowercase name or the legacy integer code clients have
    /// always been allowed to send in the query string (`status=0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" | "0" => Ok(RunStatus::Created),
            "running" | "1" => Ok(RunStatus::Running),
            "finished" | "2" => Ok(RunStatus::Finished),
            "failed" | "3" => Ok(RunStatus::Failed),
            "stopped" | "4" => Ok(RunStatus::Stopped),
            "queued" | "5" => Ok(RunStatus::Queued),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized workflow status: {0}")]
pub struct UnknownStatus(pub String);

/// A validated workflow-creation request, ready to forward downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowDraft {
    pub engine: EngineType,
    pub specification: serde_json::Value,
    /// Caller-supplied name; `None` lets the controller generate one.
    pub name: Option<String>,
}

/// True if `name` is a syntactically valid UUID.
///
/// UUIDs are reserved for system-generated workflow identifiers, so a
/// user-supplied name that parses as one would be ambiguous as a lookup key.
pub fn is_reserved_name(name: &str) -> bool {
    Uuid::parse_str(name).is_ok()
}

/// Validate a raw create-workflow body into a [`WorkflowDraft`].
///
/// `name_override` is the `workflow_name` query parameter; when present it
/// wins over the body field of the same name.
pub fn parse_create_request(
    body: &[u8],
    name_override: Option<&str>,
) -> Result<WorkflowDraft, CoreError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| CoreError::Internal("workflow specification missing or unreadable".into()))?;

    let workflow = value
        .get("workflow")
        .ok_or_else(|| CoreError::Validation("wrong specification json".into()))?;

    let engine_name = workflow
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| CoreError::Internal("workflow engine type is missing".into()))?;
    let engine: EngineType = engine_name
        .parse()
        .map_err(|e: UnknownEngine| CoreError::Internal(e.to_string()))?;

    let specification = workflow
        .get("specification")
        .cloned()
        .ok_or_else(|| CoreError::Internal("workflow specification is missing".into()))?;

    let name = name_override
        .map(str::to_string)
        .or_else(|| {
            value
                .get("workflow_name")
                .and_then(|n| n.as_str())
                .map(str::to_string)
        })
        .filter(|n| !n.is_empty());

    if let Some(ref name) = name {
        if is_reserved_name(name) {
            return Err(CoreError::Validation(format!(
                "workflow name cannot be a valid UUID: {name}"
            )));
        }
    }

    Ok(WorkflowDraft {
        engine,
        specification,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json).unwrap()
    }

    #[test]
    fn engine_types_parse_from_registered_names() {
        assert_eq!("serial".parse::<EngineType>().unwrap(), EngineType::Serial);
        assert_eq!("yadage".parse::<EngineType>().unwrap(), EngineType::Yadage);
        assert_eq!("cwl".parse::<EngineType>().unwrap(), EngineType::Cwl);
        assert!("unknown".parse::<EngineType>().is_err());
    }

    #[test]
    fn run_status_accepts_names_and_legacy_codes() {
        assert_eq!("created".parse::<RunStatus>().unwrap(), RunStatus::Created);
        assert_eq!("0".parse::<RunStatus>().unwrap(), RunStatus::Created);
        assert_eq!("3".parse::<RunStatus>().unwrap(), RunStatus::Failed);
        assert_eq!("stopped".parse::<RunStatus>().unwrap(), RunStatus::Stopped);
        assert!("6".parse::<RunStatus>().is_err());
        assert!("done".parse::<RunStatus>().is_err());
    }

    #[test]
    fn valid_request_produces_draft() {
        let draft = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {}, "type": "serial"},
                "workflow_name": "test",
            })),
            None,
        )
        .unwrap();

        assert_eq!(draft.engine, EngineType::Serial);
        assert_eq!(draft.name.as_deref(), Some("test"));
        assert_eq!(draft.specification, serde_json::json!({}));
    }

    #[test]
    fn empty_body_is_an_internal_error() {
        let err = parse_create_request(b"", None).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn wrong_envelope_key_is_a_validation_error() {
        let err = parse_create_request(
            &body(serde_json::json!({
                "nonsense": {"specification": {}, "type": "serial"},
            })),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_engine_is_an_internal_error() {
        let err = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {}, "type": "unknown"},
            })),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn missing_specification_is_an_internal_error() {
        let err = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"type": "serial"},
            })),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn uuid_name_is_rejected_from_body_and_query() {
        let uuid_name = Uuid::new_v4().to_string();

        let err = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {}, "type": "serial"},
                "workflow_name": uuid_name,
            })),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {}, "type": "serial"},
            })),
            Some(&uuid_name),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn query_name_wins_over_body_name() {
        let draft = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {}, "type": "serial"},
                "workflow_name": "from-body",
            })),
            Some("from-query"),
        )
        .unwrap();
        assert_eq!(draft.name.as_deref(), Some("from-query"));
    }

    #[test]
    fn absent_name_is_allowed() {
        let draft = parse_create_request(
            &body(serde_json::json!({
                "workflow": {"specification": {"steps": []}, "type": "yadage"},
            })),
            None,
        )
        .unwrap();
        assert!(draft.name.is_none());
    }

    #[test]
    fn reserved_name_check_matches_uuid_syntax_only() {
        assert!(is_reserved_name("f47ac10b-58cc-4372-a567-0e02b2c3d479"));
        assert!(!is_reserved_name("test"));
        assert!(!is_reserved_name("my-workflow-2"));
    }
}
