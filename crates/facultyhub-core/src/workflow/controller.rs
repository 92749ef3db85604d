use super::model::{
    FieldValue, RecoveryPolicy, WorkflowDefinition, WorkflowInput, WorkflowStatus,
};
use super::progress::ProgressLog;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Network side of a workflow: what happens once the last step is accepted.
#[async_trait]
pub trait WorkflowSubmitter: Send + Sync {
    type Output: Clone + Send + Sync + 'static;

    /// Performs the submission. Intermediate progress goes to `progress`.
    async fn submit(&self, input: &WorkflowInput, progress: &ProgressLog) -> Result<Self::Output>;
}

/// Result of [`WorkflowController::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Validation failed; the step pointer did not move.
    Invalid(String),
    /// Moved to the given step index.
    Moved(usize),
    /// The last step validated; the run is now `submitting`.
    ReadyToSubmit,
}

/// Read-only view of the active run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub run_id: Uuid,
    pub workflow: String,
    pub current_step: usize,
    pub step_count: usize,
    pub step_name: String,
    pub status: WorkflowStatus,
    pub error_message: Option<String>,
    pub progress: Vec<String>,
    /// Whether the run still accepts input.
    pub open: bool,
}

struct WorkflowRun {
    id: Uuid,
    definition: Arc<WorkflowDefinition>,
    current_step: usize,
    input: WorkflowInput,
    status: WorkflowStatus,
    error_message: Option<String>,
    progress: ProgressLog,
    /// A submission is awaiting its response.
    in_flight: bool,
    /// Succeeded, or failed under `RestartRequired`.
    closed: bool,
}

impl WorkflowRun {
    fn is_last_step(&self) -> bool {
        self.current_step >= self.definition.last_step_index()
    }

    fn ensure_editable(&self, action: &str) -> Result<()> {
        if self.closed || self.in_flight || self.status == WorkflowStatus::Submitting {
            let from = if self.closed { "closed" } else { self.status.as_str() };
            return Err(ClientError::invalid_transition(from, action));
        }
        Ok(())
    }

    fn validate(&self) -> Vec<String> {
        self.definition
            .steps
            .get(self.current_step)
            .map(|step| step.validate(&self.input))
            .unwrap_or_default()
    }

    fn fail(&mut self, message: String) {
        self.status = WorkflowStatus::Failed;
        self.error_message = Some(message);
    }
}

type CompletionCallback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Drives one workflow run at a time through its steps and submission.
///
/// The controller is responsible for:
/// - Tracking the step pointer, collected input and status of the run
/// - Refusing to advance past a step whose validation fails
/// - Running the submission and applying its outcome
/// - Discarding outcomes that arrive after the run was cancelled or replaced
pub struct WorkflowController<S: WorkflowSubmitter> {
    submitter: S,
    run: Mutex<Option<WorkflowRun>>,
    on_complete: Option<CompletionCallback<S::Output>>,
}

impl<S: WorkflowSubmitter> WorkflowController<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter,
            run: Mutex::new(None),
            on_complete: None,
        }
    }

    /// Registers a callback invoked with the server's result after a
    /// successful submission.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S::Output) + Send + Sync + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    fn lock(&self) -> MutexGuard<'_, Option<WorkflowRun>> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new run at step 0. Any previous run is discarded.
    pub fn start(&self, definition: Arc<WorkflowDefinition>) -> Uuid {
        let id = Uuid::new_v4();
        tracing::info!(workflow = %definition.name, run_id = %id, "Workflow started");
        *self.lock() = Some(WorkflowRun {
            id,
            definition,
            current_step: 0,
            input: WorkflowInput::new(),
            status: WorkflowStatus::InProgress,
            error_message: None,
            progress: ProgressLog::new(),
            in_flight: false,
            closed: false,
        });
        id
    }

    /// Records a field value for the run.
    pub fn set_field(&self, name: impl Into<String>, value: FieldValue) -> Result<()> {
        let mut guard = self.lock();
        let run = guard.as_mut().ok_or(ClientError::NoActiveRun)?;
        run.ensure_editable("edit input")?;
        run.input.set(name, value);
        Ok(())
    }

    pub fn set_text(&self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.set_field(name, FieldValue::Text(value.into()))
    }

    /// Validates the active step without touching any state.
    pub fn validate_current_step(&self) -> Result<Vec<String>> {
        let guard = self.lock();
        let run = guard.as_ref().ok_or(ClientError::NoActiveRun)?;
        Ok(run.validate())
    }

    /// Moves to the next step, or to `submitting` from the last step.
    ///
    /// On validation failure the run becomes `failed` with the first
    /// message and the step pointer stays where it is.
    pub fn advance(&self) -> Result<StepOutcome> {
        let mut guard = self.lock();
        let run = guard.as_mut().ok_or(ClientError::NoActiveRun)?;
        run.ensure_editable("advance")?;

        run.status = WorkflowStatus::Validating;
        if let Some(first) = run.validate().into_iter().next() {
            tracing::debug!(workflow = %run.definition.name, step = run.current_step, failure = %first, "Step validation failed");
            run.fail(first.clone());
            return Ok(StepOutcome::Invalid(first));
        }

        run.error_message = None;
        if run.is_last_step() {
            run.status = WorkflowStatus::Submitting;
            Ok(StepOutcome::ReadyToSubmit)
        } else {
            run.current_step += 1;
            run.status = WorkflowStatus::InProgress;
            Ok(StepOutcome::Moved(run.current_step))
        }
    }

    /// Steps back one step. No-op at step 0; refused while submitting.
    pub fn go_back(&self) -> Result<usize> {
        let mut guard = self.lock();
        let run = guard.as_mut().ok_or(ClientError::NoActiveRun)?;
        run.ensure_editable("go back")?;

        if run.current_step > 0 {
            run.current_step -= 1;
        }
        run.status = WorkflowStatus::InProgress;
        run.error_message = None;
        Ok(run.current_step)
    }

    /// Submits the run from its last step.
    ///
    /// On success the run is `succeeded`, the completion callback fires and
    /// the server's result is returned. On failure the run is `failed` with
    /// the server message (or the workflow's fallback). Under `ResumeAtStep`
    /// the run goes back to `in-progress` at the same step, keeping the
    /// message until the next submit.
    ///
    /// If the run is cancelled or replaced while the request is in flight,
    /// the outcome is dropped and `ClientError::Cancelled` is returned.
    pub async fn submit(&self) -> Result<S::Output> {
        let (run_id, definition, input, progress) = {
            let mut guard = self.lock();
            let run = guard.as_mut().ok_or(ClientError::NoActiveRun)?;
            if run.closed || run.in_flight {
                let from = if run.closed { "closed" } else { "submitting" };
                return Err(ClientError::invalid_transition(from, "submit"));
            }
            if !run.is_last_step() {
                return Err(ClientError::invalid_transition(
                    format!("at step {}", run.current_step),
                    "submit",
                ));
            }
            if run.status != WorkflowStatus::Submitting {
                if let Some(first) = run.validate().into_iter().next() {
                    run.fail(first.clone());
                    return Err(ClientError::validation(first));
                }
            }
            run.status = WorkflowStatus::Submitting;
            run.error_message = None;
            run.in_flight = true;
            (
                run.id,
                run.definition.clone(),
                run.input.clone(),
                run.progress.clone(),
            )
        };

        tracing::info!(workflow = %definition.name, run_id = %run_id, "Submitting workflow");
        let outcome = self.submitter.submit(&input, &progress).await;

        {
            let mut guard = self.lock();
            let run = match guard.as_mut() {
                Some(run) if run.id == run_id => run,
                _ => {
                    tracing::debug!(workflow = %definition.name, run_id = %run_id, "Discarding result of a cancelled run");
                    return Err(ClientError::Cancelled);
                }
            };
            run.in_flight = false;

            match &outcome {
                Ok(_) => {
                    run.status = WorkflowStatus::Succeeded;
                    run.closed = true;
                    tracing::info!(workflow = %definition.name, run_id = %run_id, "Workflow succeeded");
                }
                Err(e) => {
                    let message = e.user_message(&definition.failure_fallback);
                    tracing::warn!(workflow = %definition.name, run_id = %run_id, error = %e, "Workflow submission failed");
                    run.progress.push(format!("Error: {message}"));
                    run.fail(message);
                    match definition.recovery {
                        RecoveryPolicy::RestartRequired => run.closed = true,
                        RecoveryPolicy::ResumeAtStep => run.status = WorkflowStatus::InProgress,
                    }
                }
            }
        }

        let output = outcome?;
        if let Some(callback) = &self.on_complete {
            callback(&output);
        }
        Ok(output)
    }

    /// Discards the active run, whatever its state.
    pub fn cancel(&self) {
        if let Some(run) = self.lock().take() {
            tracing::debug!(workflow = %run.definition.name, run_id = %run.id, "Workflow cancelled");
        }
    }

    pub fn snapshot(&self) -> Option<WorkflowSnapshot> {
        self.lock().as_ref().map(|run| WorkflowSnapshot {
            run_id: run.id,
            workflow: run.definition.name.clone(),
            current_step: run.current_step,
            step_count: run.definition.steps.len(),
            step_name: run
                .definition
                .steps
                .get(run.current_step)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            status: run.status.clone(),
            error_message: run.error_message.clone(),
            progress: run.progress.notes(),
            open: !run.closed,
        })
    }

    pub fn status(&self) -> Option<WorkflowStatus> {
        self.lock().as_ref().map(|run| run.status.clone())
    }

    pub fn current_step(&self) -> Option<usize> {
        self.lock().as_ref().map(|run| run.current_step)
    }

    pub fn progress(&self) -> Vec<String> {
        self.lock()
            .as_ref()
            .map(|run| run.progress.notes())
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }
}
