pub mod condition;
pub mod draft;
pub mod types;

pub use condition::{evaluate_condition, ConditionOperator};
pub use draft::{StepDraft, StepValidationError};
pub use types::{
    builtin_templates, find_template, MessageChannel, MessageTemplate, StepKind, Workflow,
    WorkflowStatus, WorkflowStep, WorkflowTrigger,
};
