//! Request and response bodies exchanged over HTTP.
//!
//! These mirror what goes over the wire and are intentionally loose (`severity` is a plain
//! string). Clients validate them into typed domain values at the boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body returned by the service root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub message: String,
}

/// Error body, shaped like `{"detail": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Analysis outcome as sent by the analysis service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    /// One of `normal`, `attention`, `critical`
    pub severity: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    /// Suggested follow-up interval, e.g. `"2 weeks"`
    #[serde(rename = "followUp", default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl AnalyzeRes {
    /// The fixed outcome returned by the reference service and the simulated transport.
    pub fn reference() -> Self {
        Self {
            severity: "attention".into(),
            findings: vec![
                "Elevated blood pressure (145/90 mmHg)".into(),
                "Slightly elevated glucose levels (110 mg/dL)".into(),
                "Normal cholesterol levels".into(),
                "Reported symptoms suggest possible stress-related hypertension".into(),
            ],
            recommendations: vec![
                "Schedule a follow-up with your primary care physician within 2 weeks".into(),
                "Monitor blood pressure daily if possible".into(),
                "Reduce sodium intake and consider DASH diet".into(),
                "Regular moderate exercise (30 minutes, 5 days a week)".into(),
                "Practice stress reduction techniques like meditation or deep breathing".into(),
            ],
            follow_up: Some("2 weeks".into()),
        }
    }
}

/// Multipart request body, described for the OpenAPI document only.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Zero or more uploaded reports (binary parts)
    pub files: Vec<String>,
    /// JSON-encoded array of symptom strings, e.g. `["Headache","Fever"]`
    pub symptoms: String,
    #[serde(default)]
    pub medical_history: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(AnalyzeRes::reference()).unwrap();
        assert_eq!(json["followUp"], "2 weeks");
        assert!(json.get("follow_up").is_none());
    }

    #[test]
    fn test_missing_follow_up_deserializes_to_none() {
        let res: AnalyzeRes = serde_json::from_str(
            r#"{"severity":"normal","findings":[],"recommendations":[]}"#,
        )
        .unwrap();
        assert_eq!(res.follow_up, None);

        let json = serde_json::to_string(&res).unwrap();
        assert!(!json.contains("followUp"));
    }
}
