pub mod step;
pub mod template;
pub mod workflow;

pub use step::{StepKind, WorkflowStep};
pub use template::{builtin_templates, find_template, MessageChannel, MessageTemplate};
pub use workflow::{Workflow, WorkflowStatus, WorkflowTrigger};
