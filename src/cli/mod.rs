//! Workflow entry points used by the binary

pub mod orchestration;

pub use orchestration::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
