//! Fabricated execution records
//!
//! Workflows are never actually executed here; these generators produce
//! plausible-looking records so the analytics views have data to show.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use execution_history::ExecutionRecord;
use workflow_model::{StepKind, Workflow};

const SUCCESS_RATE: f64 = 0.85;
const BRANCH_TAKEN_RATE: f64 = 0.5;
const SEED_WINDOW_DAYS: i64 = 14;

const SUCCESS_MESSAGES: &[&str] = &[
    "Workflow completed successfully",
    "All patient notifications delivered",
    "Appointment reminder sent",
    "Follow-up task created for care team",
    "Refill notice delivered to patient",
];

const FAILURE_MESSAGES: &[&str] = &[
    "SMS delivery failed: invalid phone number",
    "Email bounced: mailbox unavailable",
    "Patient record missing contact details",
    "Template rendering failed",
];

/// Fabricate one execution record for a workflow.
///
/// The execution path walks the workflow's real steps in order; a
/// condition step may short-circuit the rest of the path, which counts as
/// a branch taken.
pub fn fabricate_record<R: Rng + ?Sized>(workflow: &Workflow, rng: &mut R) -> ExecutionRecord {
    let success = rng.gen_bool(SUCCESS_RATE);
    let pool = if success { SUCCESS_MESSAGES } else { FAILURE_MESSAGES };
    let message = *pool.choose(rng).unwrap_or(&"Workflow run recorded");

    let mut branches_used = 0u32;
    let mut execution_path = Vec::with_capacity(workflow.steps.len());
    for step in &workflow.steps {
        let kind = step.kind();
        execution_path.push(kind.as_str().to_string());
        if kind == StepKind::Condition && rng.gen_bool(BRANCH_TAKEN_RATE) {
            branches_used += 1;
            break;
        }
    }

    ExecutionRecord {
        id: Uuid::new_v4(),
        workflow_id: workflow.id,
        workflow_name: workflow.name.clone(),
        timestamp: Utc::now(),
        success,
        message: message.to_string(),
        duration_ms: Some(rng.gen_range(200..=3000)),
        step_count: Some(workflow.steps.len() as u32),
        category: Some(workflow.trigger.as_str().to_string()),
        branches_used: Some(branches_used),
        execution_path: Some(execution_path),
    }
}

/// Fabricate `count` records spread over the trailing two weeks.
///
/// Records come back oldest first, ready to seed an empty history.
/// Returns an empty list when there are no workflows to attribute runs to.
pub fn seed_history<R: Rng + ?Sized>(
    workflows: &[Workflow],
    count: usize,
    rng: &mut R,
) -> Vec<ExecutionRecord> {
    if workflows.is_empty() {
        return Vec::new();
    }

    let now = Utc::now();
    let window_minutes = SEED_WINDOW_DAYS * 24 * 60;

    let mut records: Vec<ExecutionRecord> = (0..count)
        .map(|_| {
            let workflow = &workflows[rng.gen_range(0..workflows.len())];
            let mut record = fabricate_record(workflow, rng);
            record.timestamp = now - Duration::minutes(rng.gen_range(0..window_minutes));
            record
        })
        .collect();

    records.sort_by_key(|r| r.timestamp);
    records
}
