//! Workflow manager service
//!
//! Holds the workflow list for the lifetime of the process. Workflows are
//! never persisted; only the execution history has a storage backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use workflow_model::{Workflow, WorkflowStatus, WorkflowStep, WorkflowTrigger};

use crate::error::{Result, StoreError};
use crate::templates::builtin_workflows;

/// The mutable fields collected by the workflow form.
///
/// Submitting the form for an existing workflow replaces these fields
/// wholesale; identity and audit fields are preserved.
#[derive(Debug, Clone)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub trigger: WorkflowTrigger,
    pub steps: Vec<WorkflowStep>,
}

/// Manages the in-memory workflow list.
#[derive(Clone)]
pub struct WorkflowManager {
    workflows: Arc<RwLock<Vec<Workflow>>>,
}

impl WorkflowManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a manager seeded with the built-in workflow templates.
    pub fn with_builtins() -> Self {
        Self {
            workflows: Arc::new(RwLock::new(builtin_workflows())),
        }
    }

    /// Create a new draft workflow from form input.
    pub async fn create(&self, draft: WorkflowDraft, created_by: &str) -> Result<Workflow> {
        validate_draft(&draft)?;

        let mut workflow = Workflow::new(draft.name, draft.description, draft.trigger, created_by);
        workflow.steps = draft.steps;

        let mut workflows = self.workflows.write().await;
        workflows.push(workflow.clone());
        info!("Created workflow {} ({})", workflow.name, workflow.id);
        Ok(workflow)
    }

    /// Replace the mutable fields of an existing workflow.
    ///
    /// Id, creation time, creator, status and last-run survive the update.
    pub async fn update(&self, id: Uuid, draft: WorkflowDraft) -> Result<Workflow> {
        validate_draft(&draft)?;

        let mut workflows = self.workflows.write().await;
        let workflow = workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::NotFound(id))?;

        workflow.name = draft.name;
        workflow.description = draft.description;
        workflow.trigger = draft.trigger;
        workflow.steps = draft.steps;
        workflow.updated_at = Utc::now();
        info!("Updated workflow {} ({})", workflow.name, workflow.id);
        Ok(workflow.clone())
    }

    /// Mark a workflow active.
    pub async fn activate(&self, id: Uuid) -> Result<Workflow> {
        self.set_status(id, WorkflowStatus::Active).await
    }

    /// Pause an active workflow.
    pub async fn pause(&self, id: Uuid) -> Result<Workflow> {
        self.set_status(id, WorkflowStatus::Paused).await
    }

    async fn set_status(&self, id: Uuid, status: WorkflowStatus) -> Result<Workflow> {
        let mut workflows = self.workflows.write().await;
        let workflow = workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::NotFound(id))?;

        workflow.status = status;
        workflow.updated_at = Utc::now();
        info!("Workflow {} is now {}", workflow.id, status.as_str());
        Ok(workflow.clone())
    }

    /// Record when a workflow last produced an execution record.
    pub async fn mark_last_run(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut workflows = self.workflows.write().await;
        let workflow = workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::NotFound(id))?;

        workflow.last_run = Some(at);
        Ok(())
    }

    /// Remove a workflow by id; returns whether anything was removed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut workflows = self.workflows.write().await;
        let before = workflows.len();
        workflows.retain(|w| w.id != id);
        let removed = workflows.len() != before;
        if removed {
            info!("Deleted workflow {}", id);
        }
        removed
    }

    /// Get a workflow by id.
    pub async fn get(&self, id: Uuid) -> Option<Workflow> {
        self.workflows.read().await.iter().find(|w| w.id == id).cloned()
    }

    /// All workflows in insertion order.
    pub async fn list(&self) -> Vec<Workflow> {
        self.workflows.read().await.clone()
    }

    /// The workflows currently flagged active.
    pub async fn active(&self) -> Vec<Workflow> {
        self.workflows
            .read()
            .await
            .iter()
            .filter(|w| w.status == WorkflowStatus::Active)
            .cloned()
            .collect()
    }
}

impl Default for WorkflowManager {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_draft(draft: &WorkflowDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::Validation("workflow name is required".to_string()));
    }
    Ok(())
}
