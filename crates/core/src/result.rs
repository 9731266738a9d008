//! Typed diagnostic results and boundary validation of analysis payloads.

use crate::TransportError;
use api_shared::AnalyzeRes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-level triage classification of a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Attention,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Attention => "attention",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected normal, attention or critical)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Severity::Normal),
            "attention" => Ok(Severity::Attention),
            "critical" => Ok(Severity::Critical),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Outcome of a successful analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticResult {
    severity: Severity,
    findings: Vec<String>,
    recommendations: Vec<String>,
    #[serde(rename = "followUp", skip_serializing_if = "Option::is_none")]
    follow_up: Option<String>,
}

impl DiagnosticResult {
    /// An empty follow-up string is treated as absent.
    pub fn new(
        severity: Severity,
        findings: Vec<String>,
        recommendations: Vec<String>,
        follow_up: Option<String>,
    ) -> Self {
        Self {
            severity,
            findings,
            recommendations,
            follow_up: follow_up.filter(|f| !f.is_empty()),
        }
    }

    /// The fixed result produced by the reference service.
    pub fn reference() -> Self {
        let wire = AnalyzeRes::reference();
        Self::new(
            Severity::Attention,
            wire.findings,
            wire.recommendations,
            wire.follow_up,
        )
    }

    /// Validate a wire payload into a typed result.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MalformedPayload`] if the severity is not one of the three
    /// known levels.
    pub fn from_wire(wire: AnalyzeRes) -> Result<Self, TransportError> {
        let severity = wire
            .severity
            .parse::<Severity>()
            .map_err(|e| TransportError::MalformedPayload(format!("at severity: {e}")))?;

        Ok(Self::new(
            severity,
            wire.findings,
            wire.recommendations,
            wire.follow_up,
        ))
    }

    /// Parse and validate a JSON response body.
    ///
    /// This uses `serde_path_to_error` so a schema mismatch names the failing field (for
    /// example `findings[2]`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MalformedPayload`] if the body is not JSON, does not match the
    /// result schema, or carries an unknown severity.
    pub fn parse_json(body: &[u8]) -> Result<Self, TransportError> {
        let mut deserializer = serde_json::Deserializer::from_slice(body);

        let wire = match serde_path_to_error::deserialize::<_, AnalyzeRes>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(TransportError::MalformedPayload(format!(
                    "schema mismatch at {path}: {source}"
                )));
            }
        };

        deserializer
            .end()
            .map_err(|e| TransportError::MalformedPayload(format!("trailing data: {e}")))?;

        Self::from_wire(wire)
    }

    pub fn to_wire(&self) -> AnalyzeRes {
        AnalyzeRes {
            severity: self.severity.as_str().to_string(),
            findings: self.findings.clone(),
            recommendations: self.recommendations.clone(),
            follow_up: self.follow_up.clone(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn follow_up(&self) -> Option<&str> {
        self.follow_up.as_deref()
    }
}
