//! Workflow aggregate and its lifecycle enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::WorkflowStep;

/// The event that nominally starts a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowTrigger {
    NewPatient,
    AppointmentScheduled,
    AppointmentCompleted,
    MissedAppointment,
    PrescriptionRefillDue,
    Manual,
}

impl WorkflowTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewPatient => "new_patient",
            Self::AppointmentScheduled => "appointment_scheduled",
            Self::AppointmentCompleted => "appointment_completed",
            Self::MissedAppointment => "missed_appointment",
            Self::PrescriptionRefillDue => "prescription_refill_due",
            Self::Manual => "manual",
        }
    }

    /// Human-readable label for list views.
    pub fn label(self) -> &'static str {
        match self {
            Self::NewPatient => "New patient registered",
            Self::AppointmentScheduled => "Appointment scheduled",
            Self::AppointmentCompleted => "Appointment completed",
            Self::MissedAppointment => "Appointment missed",
            Self::PrescriptionRefillDue => "Prescription refill due",
            Self::Manual => "Manual start",
        }
    }
}

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    Active,
    Paused,
    Error,
}

impl WorkflowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Error => "error",
        }
    }
}

/// A named, ordered list of steps with a trigger and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Client-generated id (UUID v4).
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub trigger: WorkflowTrigger,
    pub status: WorkflowStatus,
    pub steps: Vec<WorkflowStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// When the workflow last produced an execution record, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    pub created_by: String,
}

impl Workflow {
    /// Create a new draft workflow with no steps.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        trigger: WorkflowTrigger,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            trigger,
            status: WorkflowStatus::Draft,
            steps: Vec::new(),
            created_at: now,
            updated_at: now,
            last_run: None,
            created_by: created_by.into(),
        }
    }

    /// Append a step to the end of the list.
    pub fn add_step(&mut self, step: WorkflowStep) {
        self.steps.push(step);
        self.touch();
    }

    /// Remove the step at `index`, preserving the order of the rest.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn remove_step(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        self.steps.remove(index);
        self.touch();
        true
    }

    /// Swap the step at `index` with the one before it.
    ///
    /// Moving the first step up is a no-op; returns whether a swap happened.
    pub fn move_step_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.steps.len() {
            return false;
        }
        self.steps.swap(index - 1, index);
        self.touch();
        true
    }

    /// Swap the step at `index` with the one after it.
    ///
    /// Moving the last step down is a no-op; returns whether a swap happened.
    pub fn move_step_down(&mut self, index: usize) -> bool {
        if self.steps.is_empty() || index >= self.steps.len() - 1 {
            return false;
        }
        self.steps.swap(index, index + 1);
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workflow() -> Workflow {
        let mut workflow = Workflow::new(
            "Patient Welcome",
            "Greets newly registered patients",
            WorkflowTrigger::NewPatient,
            "dr.smith",
        );
        workflow.add_step(WorkflowStep::Email {
            subject: "Welcome".to_string(),
            content: "Hi".to_string(),
            recipient: "patient".to_string(),
        });
        workflow.add_step(WorkflowStep::Wait {
            delay_hours: "24".to_string(),
        });
        workflow.add_step(WorkflowStep::Sms {
            message: "How was your first visit?".to_string(),
        });
        workflow
    }

    #[test]
    fn test_new_workflow_is_draft_with_no_steps() {
        let workflow = Workflow::new("x", "y", WorkflowTrigger::Manual, "z");
        assert_eq!(workflow.status, WorkflowStatus::Draft);
        assert!(workflow.steps.is_empty());
        assert!(workflow.last_run.is_none());
    }

    #[test]
    fn test_move_first_step_up_is_noop() {
        let mut workflow = sample_workflow();
        let before = workflow.steps.clone();
        assert!(!workflow.move_step_up(0));
        assert_eq!(workflow.steps, before);
    }

    #[test]
    fn test_move_last_step_down_is_noop() {
        let mut workflow = sample_workflow();
        let before = workflow.steps.clone();
        let last = workflow.steps.len() - 1;
        assert!(!workflow.move_step_down(last));
        assert_eq!(workflow.steps, before);
    }

    #[test]
    fn test_move_step_up_swaps_adjacent() {
        let mut workflow = sample_workflow();
        let first = workflow.steps[0].clone();
        let second = workflow.steps[1].clone();

        assert!(workflow.move_step_up(1));
        assert_eq!(workflow.steps[0], second);
        assert_eq!(workflow.steps[1], first);
    }

    #[test]
    fn test_move_step_down_swaps_adjacent() {
        let mut workflow = sample_workflow();
        let second = workflow.steps[1].clone();
        let third = workflow.steps[2].clone();

        assert!(workflow.move_step_down(1));
        assert_eq!(workflow.steps[1], third);
        assert_eq!(workflow.steps[2], second);
    }

    #[test]
    fn test_remove_step_preserves_order_of_rest() {
        let mut workflow = sample_workflow();
        let first = workflow.steps[0].clone();
        let third = workflow.steps[2].clone();

        assert!(workflow.remove_step(1));
        assert_eq!(workflow.steps.len(), 2);
        assert_eq!(workflow.steps[0], first);
        assert_eq!(workflow.steps[1], third);
    }

    #[test]
    fn test_remove_step_out_of_range_is_noop() {
        let mut workflow = sample_workflow();
        let before = workflow.steps.clone();
        assert!(!workflow.remove_step(10));
        assert_eq!(workflow.steps, before);
    }

    #[test]
    fn test_workflow_serde_round_trip() {
        let workflow = sample_workflow();
        let json = serde_json::to_string(&workflow).expect("serialize");
        let back: Workflow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, workflow);
    }
}
