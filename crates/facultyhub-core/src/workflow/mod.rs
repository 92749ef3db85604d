//! Generic multi-step workflow engine.
//!
//! A workflow is a table of steps, each with required fields and
//! validation rules, followed by one network submission. The same
//! controller drives the signup wizard and the scholar-sync import.
//!
//! # Module Structure
//!
//! - `model`: definitions, collected input and status
//! - `progress`: append-only progress notes observable by the view
//! - `controller`: the `WorkflowController` state machine

mod controller;
mod model;
mod progress;

pub use controller::{StepOutcome, WorkflowController, WorkflowSnapshot, WorkflowSubmitter};
pub use model::{
    FieldValue, FileUpload, RecoveryPolicy, StepDefinition, StepRule, WorkflowDefinition,
    WorkflowInput, WorkflowStatus,
};
pub use progress::ProgressLog;
