//! Frozen submission snapshots.

use chrono::{DateTime, Utc};
use medimind_files::StagedFile;
use medimind_types::SymptomTag;
use std::fmt;
use uuid::Uuid;

/// Identity of one workflow cycle.
///
/// The gate remembers the identity of the submission in flight; a completion carrying any
/// other identity is stale and is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Snapshot of the intake taken when a submission starts.
///
/// Later edits to the intake do not affect a snapshot already handed to a transport.
#[derive(Clone, Debug)]
pub struct SubmissionRequest {
    id: SubmissionId,
    files: Vec<StagedFile>,
    symptoms: Vec<SymptomTag>,
    medical_history: String,
    created_at: DateTime<Utc>,
}

impl SubmissionRequest {
    pub fn new(
        files: Vec<StagedFile>,
        symptoms: Vec<SymptomTag>,
        medical_history: String,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            files,
            symptoms,
            medical_history,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn symptoms(&self) -> &[SymptomTag] {
        &self.symptoms
    }

    pub fn medical_history(&self) -> &str {
        &self.medical_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Symptom list encoded as a JSON array of strings, e.g. `["Headache","Fever"]`.
    pub fn symptoms_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.symptoms)
    }
}
