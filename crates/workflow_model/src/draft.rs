//! Step builder scratch state
//!
//! The step form holds every possible field while the user is typing,
//! regardless of the selected step kind. Only [`StepDraft::build`] narrows
//! that scratch state into a [`WorkflowStep`], so fields belonging to other
//! kinds can never leak into a constructed step.

use thiserror::Error;

use crate::types::{StepKind, WorkflowStep};

/// Validation failure when building a step from a draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepValidationError {
    #[error("Missing required fields for {kind} step: {fields:?}")]
    MissingFields { kind: StepKind, fields: Vec<&'static str> },
}

/// Wide scratch state behind the step form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    pub kind: StepKind,
    pub subject: String,
    pub content: String,
    pub recipient: String,
    pub message: String,
    pub delay_hours: String,
    pub expression: String,
    pub template_id: String,
    pub notes: String,
}

impl Default for StepDraft {
    fn default() -> Self {
        Self::new(StepKind::Email)
    }
}

impl StepDraft {
    /// Start an empty draft for the given step kind.
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            subject: String::new(),
            content: String::new(),
            recipient: String::new(),
            message: String::new(),
            delay_hours: String::new(),
            expression: String::new(),
            template_id: String::new(),
            notes: String::new(),
        }
    }

    /// Switch the active step kind, keeping already-entered values around.
    pub fn set_kind(&mut self, kind: StepKind) {
        self.kind = kind;
    }

    /// Required fields of the active kind that are still empty.
    ///
    /// Whitespace-only input counts as empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut require = |name, value: &str| {
            if value.trim().is_empty() {
                missing.push(name);
            }
        };

        match self.kind {
            StepKind::Email => {
                require("subject", &self.subject);
                require("content", &self.content);
            }
            StepKind::Sms => require("message", &self.message),
            StepKind::Task => require("subject", &self.subject),
            StepKind::Wait => require("delay_hours", &self.delay_hours),
            StepKind::Condition => require("expression", &self.expression),
            StepKind::Template => require("template_id", &self.template_id),
        }

        missing
    }

    /// Whether the active kind's required fields are all filled in.
    ///
    /// This is the predicate gating the "Add Step" action.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Project the draft into a step, taking only the fields that belong
    /// to the active kind.
    pub fn build(&self) -> Result<WorkflowStep, StepValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(StepValidationError::MissingFields {
                kind: self.kind,
                fields: missing,
            });
        }

        let step = match self.kind {
            StepKind::Email => WorkflowStep::Email {
                subject: self.subject.clone(),
                content: self.content.clone(),
                recipient: self.recipient.clone(),
            },
            StepKind::Sms => WorkflowStep::Sms {
                message: self.message.clone(),
            },
            StepKind::Task => WorkflowStep::Task {
                subject: self.subject.clone(),
                notes: if self.notes.trim().is_empty() {
                    None
                } else {
                    Some(self.notes.clone())
                },
            },
            StepKind::Wait => WorkflowStep::Wait {
                delay_hours: self.delay_hours.clone(),
            },
            StepKind::Condition => WorkflowStep::Condition {
                expression: self.expression.clone(),
            },
            StepKind::Template => WorkflowStep::Template {
                template_id: self.template_id.clone(),
            },
        };

        Ok(step)
    }

    /// Reset every field back to its default (kind reverts to email).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
