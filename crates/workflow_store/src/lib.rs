pub mod error;
pub mod manager;
pub mod templates;

pub use error::{Result, StoreError};
pub use manager::{WorkflowDraft, WorkflowManager};
pub use templates::builtin_workflows;
