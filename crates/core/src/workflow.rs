//! Submission gate: the diagnostic workflow state machine.
//!
//! ```text
//! idle --submit(invalid)--> idle                 (Validation, no transition)
//! idle/collecting/failed/resultReady --submit--> submitting
//! submitting --success--> resultReady
//! submitting --failure/timeout--> failed
//! any --reset--> idle                            (cancels an in-flight submission)
//! idle <--intake edits--> collecting
//! ```
//!
//! A [`DiagnosticWorkflow`] is owned by a single event loop. Two ways to drive a cycle:
//!
//! - [`DiagnosticWorkflow::submit`] runs a whole cycle (snapshot, transport call with timeout,
//!   completion) and returns the resulting state.
//! - [`DiagnosticWorkflow::begin_submission`] / [`DiagnosticWorkflow::complete_submission`]
//!   split the cycle so an event loop can keep handling input while the transport runs.
//!   Completions are matched on [`SubmissionId`]; anything that does not match the submission
//!   in flight is dropped.

use crate::config::WorkflowConfig;
use crate::intake::IntakeStore;
use crate::request::{SubmissionId, SubmissionRequest};
use crate::result::DiagnosticResult;
use crate::transport::{build_transport, TransportAdapter};
use crate::{TransportError, WorkflowError, WorkflowResult};
use medimind_files::StagedFile;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing staged, nothing in flight
    Idle,
    /// At least one file or symptom staged
    Collecting,
    /// Exactly one transport call outstanding
    Submitting { submission_id: SubmissionId },
    ResultReady { result: DiagnosticResult },
    /// Last cycle failed; the intake is untouched so the user can retry
    Failed { message: String },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Collecting => "collecting",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::ResultReady { .. } => "resultReady",
            WorkflowState::Failed { .. } => "failed",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting { .. })
    }
}

pub struct DiagnosticWorkflow {
    intake: IntakeStore,
    state: WorkflowState,
    transport: Arc<dyn TransportAdapter>,
    request_timeout: Duration,
}

impl DiagnosticWorkflow {
    pub fn new(transport: Arc<dyn TransportAdapter>, request_timeout: Duration) -> Self {
        Self {
            intake: IntakeStore::new(),
            state: WorkflowState::Idle,
            transport,
            request_timeout,
        }
    }

    /// Build a workflow with the transport selected by `cfg`.
    pub fn from_config(cfg: &WorkflowConfig) -> Result<Self, TransportError> {
        Ok(Self::new(build_transport(cfg)?, cfg.request_timeout()))
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn intake(&self) -> &IntakeStore {
        &self.intake
    }

    pub fn result(&self) -> Option<&DiagnosticResult> {
        match &self.state {
            WorkflowState::ResultReady { result } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Identity of the submission in flight, if any.
    pub fn in_flight(&self) -> Option<SubmissionId> {
        match self.state {
            WorkflowState::Submitting { submission_id } => Some(submission_id),
            _ => None,
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    // ---- intake mutations ------------------------------------------------

    pub fn add_file(&mut self, file: StagedFile) {
        self.intake.add_file(file);
        self.refresh_collecting();
    }

    pub fn remove_file(&mut self, index: usize) -> Option<StagedFile> {
        let removed = self.intake.remove_file(index);
        self.refresh_collecting();
        removed
    }

    pub fn add_symptom(&mut self, text: &str) -> bool {
        let added = self.intake.add_symptom(text);
        self.refresh_collecting();
        added
    }

    pub fn remove_symptom(&mut self, text: &str) -> bool {
        let removed = self.intake.remove_symptom(text);
        self.refresh_collecting();
        removed
    }

    pub fn set_history(&mut self, text: impl Into<String>) {
        self.intake.set_history(text);
        self.refresh_collecting();
    }

    /// Idle and Collecting track whether anything is staged; other states are left alone.
    fn refresh_collecting(&mut self) {
        if matches!(self.state, WorkflowState::Idle | WorkflowState::Collecting) {
            self.state = if self.intake.is_empty() {
                WorkflowState::Idle
            } else {
                WorkflowState::Collecting
            };
        }
    }

    // ---- submission gate -------------------------------------------------

    /// Start a cycle: validate, snapshot the intake and move to `submitting`.
    ///
    /// The caller owns the returned request and must hand the transport outcome back through
    /// [`Self::complete_submission`].
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::ConcurrentSubmission`] if a submission is already in flight; the
    ///   in-flight submission is not affected.
    /// - [`WorkflowError::Validation`] if no file and no symptom is staged; the state is not
    ///   changed.
    pub fn begin_submission(&mut self) -> WorkflowResult<SubmissionRequest> {
        if let Some(in_flight) = self.in_flight() {
            tracing::warn!(submission = %in_flight, "submit rejected: submission in flight");
            return Err(WorkflowError::ConcurrentSubmission(in_flight));
        }

        if self.intake.is_empty() {
            tracing::warn!(state = self.state.name(), "submit rejected: nothing to analyze");
            return Err(WorkflowError::Validation);
        }

        let request = self.intake.snapshot();
        tracing::info!(
            submission = %request.id(),
            created_at = %request.created_at(),
            from = self.state.name(),
            files = request.files().len(),
            symptoms = request.symptoms().len(),
            transport = self.transport.name(),
            "submission started"
        );

        self.state = WorkflowState::Submitting {
            submission_id: request.id(),
        };
        Ok(request)
    }

    /// Finish a cycle with the transport outcome.
    ///
    /// Returns `false` (and changes nothing) if `submission_id` is not the submission in
    /// flight, which happens when the workflow was reset while the call was running.
    pub fn complete_submission(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<DiagnosticResult, TransportError>,
    ) -> bool {
        if self.in_flight() != Some(submission_id) {
            tracing::warn!(
                submission = %submission_id,
                state = self.state.name(),
                "dropping stale submission outcome"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                tracing::info!(
                    submission = %submission_id,
                    severity = %result.severity(),
                    findings = result.findings().len(),
                    "submission completed"
                );
                WorkflowState::ResultReady { result }
            }
            Err(err) => {
                tracing::error!(
                    submission = %submission_id,
                    kind = err.kind(),
                    error = %err,
                    "submission failed"
                );
                WorkflowState::Failed {
                    message: err.user_message(),
                }
            }
        };
        true
    }

    /// Run a whole cycle: snapshot, transport call bounded by the request timeout, completion.
    ///
    /// Transport failures do not surface as `Err`; they leave the workflow in
    /// [`WorkflowState::Failed`].
    ///
    /// Dropping the returned future before it resolves also ends the cycle: the workflow moves
    /// to `failed` with [`TransportError::Cancelled`] and the intake is kept.
    ///
    /// # Errors
    ///
    /// Same as [`Self::begin_submission`].
    pub async fn submit(&mut self) -> WorkflowResult<&WorkflowState> {
        let request = self.begin_submission()?;
        let transport = Arc::clone(&self.transport);
        let request_timeout = self.request_timeout;

        let guard = SubmissionGuard::new(self, request.id());
        let outcome = tokio::time::timeout(request_timeout, transport.analyze(&request))
            .await
            .unwrap_or(Err(TransportError::Timeout(request_timeout)));
        guard.finish(outcome);

        Ok(&self.state)
    }

    /// Clear intake, result and error and return to `idle`.
    ///
    /// If a submission is in flight its identity is forgotten, so its outcome will be dropped
    /// when it arrives.
    pub fn reset(&mut self) {
        if let Some(in_flight) = self.in_flight() {
            tracing::info!(submission = %in_flight, "reset cancels in-flight submission");
        }
        self.intake.clear();
        self.state = WorkflowState::Idle;
    }
}

/// Completes the driven submission exactly once, as cancelled if `finish` is never reached.
struct SubmissionGuard<'a> {
    workflow: Option<&'a mut DiagnosticWorkflow>,
    submission_id: SubmissionId,
}

impl<'a> SubmissionGuard<'a> {
    fn new(workflow: &'a mut DiagnosticWorkflow, submission_id: SubmissionId) -> Self {
        Self {
            workflow: Some(workflow),
            submission_id,
        }
    }

    fn finish(mut self, outcome: Result<DiagnosticResult, TransportError>) {
        if let Some(workflow) = self.workflow.take() {
            workflow.complete_submission(self.submission_id, outcome);
        }
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        let Some(workflow) = self.workflow.take() else {
            return;
        };
        if workflow.in_flight() == Some(self.submission_id) {
            workflow.complete_submission(self.submission_id, Err(TransportError::Cancelled));
        }
    }
}

impl std::fmt::Debug for DiagnosticWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticWorkflow")
            .field("intake", &self.intake)
            .field("state", &self.state)
            .field("transport", &self.transport.name())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
