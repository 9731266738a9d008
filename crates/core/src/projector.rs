//! Result projector: maps a [`DiagnosticResult`] to what the user sees.
//!
//! The mapping is pure. Findings and recommendations are passed through in source order with
//! no sorting and no de-duplication.

use crate::result::{DiagnosticResult, Severity};
use serde::Serialize;
use std::fmt;

/// Colour family used to render a summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Warning,
    Danger,
}

/// Presentation triple (label, tone, icon class) plus the summary sentence and glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeverityPresentation {
    pub label: &'static str,
    pub tone: Tone,
    pub icon_class: &'static str,
    pub icon: &'static str,
    pub summary: &'static str,
}

pub fn present(severity: Severity) -> SeverityPresentation {
    match severity {
        Severity::Normal => SeverityPresentation {
            label: "Normal Results",
            tone: Tone::Positive,
            icon_class: "icon-check",
            icon: "✓",
            summary: "Your results are within normal ranges.",
        },
        Severity::Attention => SeverityPresentation {
            label: "Requires Attention",
            tone: Tone::Warning,
            icon_class: "icon-alert",
            icon: "!",
            summary: "Your results require medical attention.",
        },
        Severity::Critical => SeverityPresentation {
            label: "Critical Findings",
            tone: Tone::Danger,
            icon_class: "icon-alert-double",
            icon: "!!",
            summary: "Your results indicate critical findings that need immediate medical attention.",
        },
    }
}

/// Rendered view of a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub presentation: SeverityPresentation,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub follow_up: Option<String>,
}

impl ResultView {
    /// `"Recommended follow-up: <text>"`, or `None` when the result has no follow-up.
    pub fn follow_up_line(&self) -> Option<String> {
        self.follow_up
            .as_ref()
            .map(|f| format!("Recommended follow-up: {f}"))
    }
}

pub fn project(result: &DiagnosticResult) -> ResultView {
    ResultView {
        presentation: present(result.severity()),
        findings: result.findings().to_vec(),
        recommendations: result.recommendations().to_vec(),
        follow_up: result.follow_up().map(str::to_owned),
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.presentation;
        writeln!(f, "[{}] {}", p.icon, p.label)?;
        writeln!(f, "{}", p.summary)?;
        if let Some(line) = self.follow_up_line() {
            writeln!(f, "{line}")?;
        }

        writeln!(f)?;
        writeln!(f, "Key Findings")?;
        for finding in &self.findings {
            writeln!(f, "  • {finding}")?;
        }

        writeln!(f)?;
        writeln!(f, "Recommendations")?;
        for (i, rec) in self.recommendations.iter().enumerate() {
            writeln!(f, "  {}. {rec}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_table() {
        let normal = present(Severity::Normal);
        let attention = present(Severity::Attention);
        let critical = present(Severity::Critical);

        assert_eq!((normal.label, normal.tone), ("Normal Results", Tone::Positive));
        assert_eq!(
            (attention.label, attention.tone),
            ("Requires Attention", Tone::Warning)
        );
        assert_eq!(
            (critical.label, critical.tone),
            ("Critical Findings", Tone::Danger)
        );
    }

    #[test]
    fn test_critical_without_follow_up_renders_no_follow_up_line() {
        let result = DiagnosticResult::new(
            Severity::Critical,
            vec!["Troponin elevated".into()],
            vec!["Go to the emergency department".into()],
            None,
        );

        let view = project(&result);
        let text = view.to_string();

        assert_eq!(view.presentation.tone, Tone::Danger);
        assert_eq!(view.follow_up_line(), None);
        assert!(!text.contains("Recommended follow-up"));
        assert!(text.starts_with("[!!] Critical Findings"));
    }

    #[test]
    fn test_lists_keep_source_order_and_duplicates() {
        let result = DiagnosticResult::new(
            Severity::Normal,
            vec!["b".into(), "a".into(), "b".into()],
            vec!["z".into(), "y".into()],
            Some("1 year".into()),
        );

        let view = project(&result);

        assert_eq!(view.findings, vec!["b", "a", "b"]);
        assert_eq!(view.recommendations, vec!["z", "y"]);
        assert_eq!(
            view.follow_up_line().as_deref(),
            Some("Recommended follow-up: 1 year")
        );
    }

    #[test]
    fn test_display_numbers_recommendations_from_one() {
        let view = project(&DiagnosticResult::reference());
        let text = view.to_string();

        assert!(text.contains("  1. Schedule a follow-up"));
        assert!(text.contains("  5. Practice stress reduction"));
        assert!(text.contains("Recommended follow-up: 2 weeks"));
    }

    #[test]
    fn test_tone_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tone::Danger).unwrap(), "\"danger\"");
    }
}
