//! Multipart HTTP transport for the analysis service.
//!
//! Request layout:
//! - one `files` part per staged file, carrying the original file name and detected media type
//! - one `symptoms` text part holding a JSON array of strings
//! - one `medical_history` text part holding the raw history text (possibly empty)
//!
//! Any non-2xx status is a failure. A 2xx body is validated against the result schema before
//! it reaches the workflow.

use super::TransportAdapter;
use crate::constants::MAX_ERROR_BODY_CHARS;
use crate::request::SubmissionRequest;
use crate::result::DiagnosticResult;
use crate::TransportError;
use api_shared::{FILES_FIELD, MEDICAL_HISTORY_FIELD, SYMPTOMS_FIELD};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::error::Error as _;
use std::time::Duration;

const USER_AGENT: &str = concat!("medimind/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(describe(&e)))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(request: &SubmissionRequest) -> Result<Form, TransportError> {
        let mut form = Form::new();

        for file in request.files() {
            let part = Part::bytes(file.bytes().to_vec())
                .file_name(file.name().to_owned())
                .mime_str(file.upload_media_type())
                .map_err(|e| TransportError::Request(describe(&e)))?;
            form = form.part(FILES_FIELD, part);
        }

        let symptoms = request
            .symptoms_json()
            .map_err(|e| TransportError::Request(format!("failed to encode symptoms: {e}")))?;

        Ok(form
            .text(SYMPTOMS_FIELD, symptoms)
            .text(MEDICAL_HISTORY_FIELD, request.medical_history().to_owned()))
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(describe(&err))
        }
    }
}

#[async_trait]
impl TransportAdapter for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn analyze(
        &self,
        request: &SubmissionRequest,
    ) -> Result<DiagnosticResult, TransportError> {
        let form = Self::build_form(request)?;

        tracing::debug!(
            submission = %request.id(),
            endpoint = %self.endpoint,
            files = request.files().len(),
            symptoms = request.symptoms().len(),
            "posting analysis request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        DiagnosticResult::parse_json(&body)
    }
}

/// Render an error with its source chain; reqwest's own message omits the underlying cause.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
