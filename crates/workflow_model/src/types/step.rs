//! Workflow step definitions
//!
//! A step is a tagged action inside a workflow. Each variant carries its
//! own configuration payload, so a step can never hold fields that belong
//! to another step type.

use serde::{Deserialize, Serialize};

/// A single automation step inside a workflow.
///
/// Serialized with an explicit `type` tag and a `config` payload, e.g.
/// `{"type": "email", "config": {"subject": "...", ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Send an email to the patient or a staff member.
    Email {
        subject: String,
        content: String,
        recipient: String,
    },
    /// Send a text message.
    Sms { message: String },
    /// Create a task for the front desk or care team.
    Task {
        subject: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// Pause the workflow for a number of hours.
    ///
    /// The delay is kept as the string the user entered; it is not
    /// numerically validated.
    Wait { delay_hours: String },
    /// Branch on a condition expression (see [`crate::condition`]).
    Condition { expression: String },
    /// Send a prebuilt message template.
    Template { template_id: String },
}

impl WorkflowStep {
    /// The tag of this step, without its payload.
    pub fn kind(&self) -> StepKind {
        match self {
            WorkflowStep::Email { .. } => StepKind::Email,
            WorkflowStep::Sms { .. } => StepKind::Sms,
            WorkflowStep::Task { .. } => StepKind::Task,
            WorkflowStep::Wait { .. } => StepKind::Wait,
            WorkflowStep::Condition { .. } => StepKind::Condition,
            WorkflowStep::Template { .. } => StepKind::Template,
        }
    }
}

/// The kind of step, used by the step builder and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Email,
    Sms,
    Task,
    Wait,
    Condition,
    Template,
}

impl StepKind {
    pub const ALL: [StepKind; 6] = [
        StepKind::Email,
        StepKind::Sms,
        StepKind::Task,
        StepKind::Wait,
        StepKind::Condition,
        StepKind::Template,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Email => "email",
            StepKind::Sms => "sms",
            StepKind::Task => "task",
            StepKind::Wait => "wait",
            StepKind::Condition => "condition",
            StepKind::Template => "template",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
