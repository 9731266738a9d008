//! # MediMind Core
//!
//! Client-side diagnostic intake workflow.
//!
//! This crate holds the state a user builds up before asking for an analysis, and the gate that
//! turns it into exactly one request at a time:
//! - Intake store: staged files, symptom tags and free-text medical history
//! - Submission gate: the `idle → collecting → submitting → resultReady | failed` state machine
//! - Transport adapters: multipart HTTP against an analysis service, or a simulated answer
//! - Result projector: severity presentation and the rendered result view
//!
//! **No server concerns**: the reference analysis service lives in `api-rest`; wire types
//! shared by both sides live in `api-shared`.

pub mod config;
pub mod constants;
mod error;
pub mod intake;
pub mod projector;
pub mod request;
pub mod result;
pub mod transport;
pub mod workflow;

pub use config::{AnalysisMode, WorkflowConfig};
pub use error::{TransportError, WorkflowError, WorkflowResult};
pub use intake::IntakeStore;
pub use projector::{present, project, ResultView, SeverityPresentation, Tone};
pub use request::{SubmissionId, SubmissionRequest};
pub use result::{DiagnosticResult, Severity, UnknownSeverity};
pub use transport::{build_transport, HttpTransport, SimulatedTransport, TransportAdapter};
pub use workflow::{DiagnosticWorkflow, WorkflowState};

pub use medimind_files::StagedFile;
pub use medimind_types::SymptomTag;
