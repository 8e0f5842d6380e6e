//! Client for the downstream workflow-controller service.
//!
//! The controller owns all authoritative workflow and workspace-file state;
//! the gateway talks to it through the [`WorkflowController`] trait so tests
//! can substitute a mock. [`HttpWorkflowController`] is the production
//! implementation over its REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpWorkflowController, WorkflowController};
pub use error::ControllerError;
