//! Transport adapters: how a submission snapshot becomes a diagnostic result.
//!
//! The workflow only sees the [`TransportAdapter`] trait. Production code picks an
//! implementation from [`WorkflowConfig::mode`]; tests plug in their own deterministic stubs.

mod http;
mod simulated;

pub use http::HttpTransport;
pub use simulated::SimulatedTransport;

use crate::config::{AnalysisMode, WorkflowConfig};
use crate::request::SubmissionRequest;
use crate::result::DiagnosticResult;
use crate::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

/// One analysis call per submission.
///
/// Implementations make a single attempt and never retry. They receive the snapshot by
/// reference and must not keep it beyond the call.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Short identifier used in logs (e.g. "http", "simulated")
    fn name(&self) -> &'static str;

    async fn analyze(&self, request: &SubmissionRequest)
        -> Result<DiagnosticResult, TransportError>;
}

/// Build the transport selected by configuration.
///
/// # Errors
///
/// Returns [`TransportError::Request`] if the HTTP client cannot be constructed.
pub fn build_transport(cfg: &WorkflowConfig) -> Result<Arc<dyn TransportAdapter>, TransportError> {
    let transport: Arc<dyn TransportAdapter> = match cfg.mode() {
        AnalysisMode::Remote => Arc::new(HttpTransport::new(
            cfg.analyze_url().clone(),
            cfg.request_timeout(),
        )?),
        AnalysisMode::Simulated => Arc::new(SimulatedTransport::new(cfg.simulated_delay())),
    };

    tracing::info!(
        transport = transport.name(),
        mode = %cfg.mode(),
        "analysis transport ready"
    );
    Ok(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_transport_follows_mode() {
        let remote = build_transport(&WorkflowConfig::default()).unwrap();
        assert_eq!(remote.name(), "http");

        let simulated =
            build_transport(&WorkflowConfig::default().with_mode(AnalysisMode::Simulated))
                .unwrap();
        assert_eq!(simulated.name(), "simulated");
    }
}
