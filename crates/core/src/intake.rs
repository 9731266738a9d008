//! Intake store: staged files, symptom tags and medical history.
//!
//! The store is plain in-memory state. It never performs I/O and never fails loudly: rejected
//! input (blank or duplicate symptoms, out-of-range removals) is a silent no-op reported only
//! through the boolean/`Option` return values and a debug log line.

use crate::request::SubmissionRequest;
use medimind_files::StagedFile;
use medimind_types::SymptomTag;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeStore {
    files: Vec<StagedFile>,
    symptoms: Vec<SymptomTag>,
    medical_history: String,
}

impl IntakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file. Files with the same name are kept as separate entries.
    pub fn add_file(&mut self, file: StagedFile) {
        tracing::debug!(file = file.name(), index = self.files.len(), "intake: add file");
        self.files.push(file);
    }

    /// Removes the file at `index`, or does nothing if the index is out of range.
    pub fn remove_file(&mut self, index: usize) -> Option<StagedFile> {
        if index >= self.files.len() {
            tracing::debug!(index, len = self.files.len(), "intake: remove file out of range");
            return None;
        }
        let removed = self.files.remove(index);
        tracing::debug!(file = removed.name(), index, "intake: remove file");
        Some(removed)
    }

    /// Adds a trimmed symptom unless it is blank or already staged.
    ///
    /// Returns `true` if the symptom was appended.
    pub fn add_symptom(&mut self, text: &str) -> bool {
        let Ok(tag) = SymptomTag::new(text) else {
            tracing::debug!("intake: blank symptom ignored");
            return false;
        };

        if self.symptoms.contains(&tag) {
            tracing::debug!(symptom = %tag, "intake: duplicate symptom ignored");
            return false;
        }

        tracing::debug!(symptom = %tag, "intake: add symptom");
        self.symptoms.push(tag);
        true
    }

    /// Removes the first symptom whose text equals `text` exactly.
    ///
    /// Returns `true` if a symptom was removed.
    pub fn remove_symptom(&mut self, text: &str) -> bool {
        match self.symptoms.iter().position(|s| s.as_str() == text) {
            Some(index) => {
                self.symptoms.remove(index);
                tracing::debug!(symptom = text, "intake: remove symptom");
                true
            }
            None => false,
        }
    }

    pub fn set_history(&mut self, text: impl Into<String>) {
        self.medical_history = text.into();
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

    /// True when there is nothing to analyze: no files and no symptoms.
    ///
    /// Medical history alone does not make the intake submittable.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.symptoms.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.symptoms.clear();
        self.medical_history.clear();
    }

    /// Freezes the current intake into a new submission request.
    pub fn snapshot(&self) -> SubmissionRequest {
        SubmissionRequest::new(
            self.files.clone(),
            self.symptoms.clone(),
            self.medical_history.clone(),
        )
    }
}
