//! Execution record type
//!
//! A record of one (simulated) workflow run. Records only exist to feed
//! the analytics views; they are not produced by a real execution engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in the workflow execution history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub workflow_name: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches_used: Option<u32>,
    /// Step kinds walked during the run, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_path: Option<Vec<String>>,
}

impl ExecutionRecord {
    /// Create a minimal record; optional detail fields start empty.
    pub fn new(
        workflow_id: Uuid,
        workflow_name: impl Into<String>,
        success: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            workflow_name: workflow_name.into(),
            timestamp: Utc::now(),
            success,
            message: message.into(),
            duration_ms: None,
            step_count: None,
            category: None,
            branches_used: None,
            execution_path: None,
        }
    }
}
