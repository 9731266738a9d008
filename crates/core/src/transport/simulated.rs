use super::TransportAdapter;
use crate::request::SubmissionRequest;
use crate::result::DiagnosticResult;
use crate::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Offline transport: waits a fixed delay and answers with a fixed result.
///
/// Selected with `MEDIMIND_ANALYSIS_MODE=simulated` for demos without an analysis service.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    result: DiagnosticResult,
}

impl SimulatedTransport {
    /// Answers with [`DiagnosticResult::reference`] after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self::with_result(delay, DiagnosticResult::reference())
    }

    pub fn with_result(delay: Duration, result: DiagnosticResult) -> Self {
        Self { delay, result }
    }
}

#[async_trait]
impl TransportAdapter for SimulatedTransport {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn analyze(
        &self,
        request: &SubmissionRequest,
    ) -> Result<DiagnosticResult, TransportError> {
        tracing::debug!(
            submission = %request.id(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating analysis"
        );
        tokio::time::sleep(self.delay).await;
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Severity;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_answers_after_delay() {
        let transport = SimulatedTransport::new(Duration::from_secs(3));
        let request = SubmissionRequest::new(vec![], vec![], String::new());

        let started = Instant::now();
        let result = transport.analyze(&request).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(3));
        assert_eq!(result, DiagnosticResult::reference());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_result() {
        let custom = DiagnosticResult::new(Severity::Normal, vec![], vec![], None);
        let transport = SimulatedTransport::with_result(Duration::ZERO, custom.clone());
        let request = SubmissionRequest::new(vec![], vec![], String::new());

        assert_eq!(transport.analyze(&request).await.unwrap(), custom);
    }
}
