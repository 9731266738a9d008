use crate::request::SubmissionId;
use std::time::Duration;

/// Errors raised by the submission gate and by startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("nothing to analyze: stage at least one file or symptom")]
    Validation,
    #[error("submission {0} is already in flight")]
    ConcurrentSubmission(SubmissionId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

/// Failures of a single analysis call.
///
/// The gate collapses every variant into one failed state with a message; the variant is kept
/// for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read
    #[error("network error: {0}")]
    Network(String),
    /// The analysis service answered with a non-success status
    #[error("analysis service returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The analysis service answered 2xx with a body that does not match the result schema
    #[error("malformed analysis payload: {0}")]
    MalformedPayload(String),
    /// No answer within the configured bound
    #[error("analysis did not complete within {0:?}")]
    Timeout(Duration),
    /// The caller stopped waiting before the analysis finished
    #[error("analysis was cancelled before it completed")]
    Cancelled,
    /// The request or HTTP client could not be built
    #[error("failed to build analysis request: {0}")]
    Request(String),
}

impl TransportError {
    /// Coarse classification used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Network(_) => "network",
            TransportError::Status { .. } | TransportError::MalformedPayload(_) => "transport",
            TransportError::Timeout(_) => "timeout",
            TransportError::Cancelled => "cancelled",
            TransportError::Request(_) => "request",
        }
    }

    /// Message shown to the user when a submission fails.
    pub fn user_message(&self) -> String {
        format!("Diagnostics analysis failed: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_status_and_payload_errors() {
        let status = TransportError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        let payload = TransportError::MalformedPayload("missing field".into());

        assert_eq!(status.kind(), "transport");
        assert_eq!(payload.kind(), "transport");
        assert_eq!(TransportError::Network("refused".into()).kind(), "network");
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(30)).kind(),
            "timeout"
        );
        assert_eq!(TransportError::Cancelled.kind(), "cancelled");
    }

    #[test]
    fn test_user_message_includes_cause() {
        let err = TransportError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(
            err.user_message(),
            "Diagnostics analysis failed: analysis service returned status 500: boom"
        );
    }
}
