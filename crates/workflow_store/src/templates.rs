//! Ready-made workflows shipped with the product
//!
//! These mirror the automations a practice typically starts from; new
//! installs seed the manager with them as editable drafts.

use workflow_model::{Workflow, WorkflowStep, WorkflowTrigger};

/// The built-in workflow templates, as draft workflows.
pub fn builtin_workflows() -> Vec<Workflow> {
    vec![
        new_patient_onboarding(),
        appointment_reminder(),
        refill_followup(),
        missed_appointment_reengagement(),
    ]
}

fn new_patient_onboarding() -> Workflow {
    let mut workflow = Workflow::new(
        "New patient onboarding",
        "Welcomes newly registered patients and schedules their intake",
        WorkflowTrigger::NewPatient,
        "system",
    );
    workflow.add_step(WorkflowStep::Template {
        template_id: "patient_welcome".to_string(),
    });
    workflow.add_step(WorkflowStep::Wait {
        delay_hours: "24".to_string(),
    });
    workflow.add_step(WorkflowStep::Task {
        subject: "Schedule intake appointment".to_string(),
        notes: Some("Call within 48 hours of registration".to_string()),
    });
    workflow
}

fn appointment_reminder() -> Workflow {
    let mut workflow = Workflow::new(
        "Appointment reminder",
        "Reminds patients the day before their appointment",
        WorkflowTrigger::AppointmentScheduled,
        "system",
    );
    workflow.add_step(WorkflowStep::Wait {
        delay_hours: "24".to_string(),
    });
    workflow.add_step(WorkflowStep::Template {
        template_id: "appointment_reminder".to_string(),
    });
    workflow
}

fn refill_followup() -> Workflow {
    let mut workflow = Workflow::new(
        "Prescription refill follow-up",
        "Notifies patients when a refill is due and escalates if they are overdue",
        WorkflowTrigger::PrescriptionRefillDue,
        "system",
    );
    workflow.add_step(WorkflowStep::Template {
        template_id: "refill_notice".to_string(),
    });
    workflow.add_step(WorkflowStep::Wait {
        delay_hours: "72".to_string(),
    });
    workflow.add_step(WorkflowStep::Condition {
        expression: "prescription.days_overdue > 7".to_string(),
    });
    workflow.add_step(WorkflowStep::Task {
        subject: "Call patient about overdue refill".to_string(),
        notes: None,
    });
    workflow
}

fn missed_appointment_reengagement() -> Workflow {
    let mut workflow = Workflow::new(
        "Missed appointment re-engagement",
        "Reaches out after a missed appointment to get it rescheduled",
        WorkflowTrigger::MissedAppointment,
        "system",
    );
    workflow.add_step(WorkflowStep::Sms {
        message: "We missed you today. Reply to reschedule your appointment.".to_string(),
    });
    workflow.add_step(WorkflowStep::Wait {
        delay_hours: "48".to_string(),
    });
    workflow.add_step(WorkflowStep::Email {
        subject: "Let's get you rescheduled".to_string(),
        content: "We noticed you missed your recent appointment. Use the patient portal or call us to find a new time.".to_string(),
        recipient: "patient".to_string(),
    });
    workflow
}
