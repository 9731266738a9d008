//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the workflow. The
//! parsing helpers take `Option<String>` values rather than reading the environment themselves
//! so they can be exercised in tests without touching process-wide state.

use crate::constants::{
    DEFAULT_ANALYZE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SIMULATED_DELAY_MS,
    ENV_ANALYSIS_MODE, ENV_ANALYZE_URL, ENV_REQUEST_TIMEOUT_SECS, ENV_SIMULATED_DELAY_MS,
};
use crate::{WorkflowError, WorkflowResult};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Where analysis results come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisMode {
    /// POST the intake to the configured analysis endpoint
    #[default]
    Remote,
    /// Answer with the fixed reference result after a delay, without any network call
    Simulated,
}

impl FromStr for AnalysisMode {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(AnalysisMode::Remote),
            "simulated" => Ok(AnalysisMode::Simulated),
            other => Err(WorkflowError::InvalidConfig(format!(
                "unknown analysis mode '{other}' (expected 'remote' or 'simulated')"
            ))),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Remote => f.write_str("remote"),
            AnalysisMode::Simulated => f.write_str("simulated"),
        }
    }
}

/// Workflow configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    mode: AnalysisMode,
    analyze_url: Url,
    request_timeout: Duration,
    simulated_delay: Duration,
}

impl WorkflowConfig {
    /// Create a new `WorkflowConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidConfig`] if the timeout is zero or the URL is not
    /// `http`/`https`.
    pub fn new(
        mode: AnalysisMode,
        analyze_url: Url,
        request_timeout: Duration,
        simulated_delay: Duration,
    ) -> WorkflowResult<Self> {
        if request_timeout.is_zero() {
            return Err(WorkflowError::InvalidConfig(
                "request timeout must be greater than zero".into(),
            ));
        }

        if !matches!(analyze_url.scheme(), "http" | "https") {
            return Err(WorkflowError::InvalidConfig(format!(
                "analysis endpoint must use http or https, got '{}'",
                analyze_url.scheme()
            )));
        }

        Ok(Self {
            mode,
            analyze_url,
            request_timeout,
            simulated_delay,
        })
    }

    /// Build a configuration from raw (possibly absent) environment values.
    pub fn from_env_values(
        mode: Option<String>,
        analyze_url: Option<String>,
        request_timeout_secs: Option<String>,
        simulated_delay_ms: Option<String>,
    ) -> WorkflowResult<Self> {
        Self::new(
            analysis_mode_from_env_value(mode)?,
            analyze_url_from_env_value(analyze_url)?,
            Duration::from_secs(u64_from_env_value(
                ENV_REQUEST_TIMEOUT_SECS,
                request_timeout_secs,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            Duration::from_millis(u64_from_env_value(
                ENV_SIMULATED_DELAY_MS,
                simulated_delay_ms,
                DEFAULT_SIMULATED_DELAY_MS,
            )?),
        )
    }

    /// Read the `MEDIMIND_*` variables from the process environment.
    ///
    /// Call this once from `main`, never from request handling.
    pub fn from_env() -> WorkflowResult<Self> {
        Self::from_env_values(
            std::env::var(ENV_ANALYSIS_MODE).ok(),
            std::env::var(ENV_ANALYZE_URL).ok(),
            std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok(),
            std::env::var(ENV_SIMULATED_DELAY_MS).ok(),
        )
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn simulated_delay(&self) -> Duration {
        self.simulated_delay
    }

    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::default(),
            analyze_url: default_analyze_url(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            simulated_delay: Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS),
        }
    }
}

fn default_analyze_url() -> Url {
    Url::parse(DEFAULT_ANALYZE_URL).expect("default analyze URL is valid")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the analysis mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`AnalysisMode::Remote`].
pub fn analysis_mode_from_env_value(value: Option<String>) -> WorkflowResult<AnalysisMode> {
    non_blank(value)
        .map(|v| v.parse::<AnalysisMode>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse the analysis endpoint from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ANALYZE_URL`].
pub fn analyze_url_from_env_value(value: Option<String>) -> WorkflowResult<Url> {
    match non_blank(value) {
        Some(raw) => Url::parse(&raw).map_err(|e| {
            WorkflowError::InvalidConfig(format!("{ENV_ANALYZE_URL} '{raw}' is not a URL: {e}"))
        }),
        None => Ok(default_analyze_url()),
    }
}

fn u64_from_env_value(name: &str, value: Option<String>, default: u64) -> WorkflowResult<u64> {
    match non_blank(value) {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            WorkflowError::InvalidConfig(format!(
                "{name} must be a non-negative integer, got '{raw}'"
            ))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let cfg = WorkflowConfig::from_env_values(None, None, None, None).unwrap();

        assert_eq!(cfg.mode(), AnalysisMode::Remote);
        assert_eq!(cfg.analyze_url().as_str(), DEFAULT_ANALYZE_URL);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.simulated_delay(), Duration::from_millis(3_000));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = WorkflowConfig::from_env_values(
            Some("  ".into()),
            Some("".into()),
            Some(" ".into()),
            None,
        )
        .unwrap();

        assert_eq!(cfg.mode(), AnalysisMode::Remote);
        assert_eq!(cfg.analyze_url().as_str(), DEFAULT_ANALYZE_URL);
    }

    #[test]
    fn test_mode_parsing_is_case_insensitive() {
        assert_eq!(
            analysis_mode_from_env_value(Some("Simulated".into())).unwrap(),
            AnalysisMode::Simulated
        );
        assert_eq!(
            analysis_mode_from_env_value(Some("REMOTE".into())).unwrap(),
            AnalysisMode::Remote
        );
        assert!(matches!(
            analysis_mode_from_env_value(Some("mock".into())),
            Err(WorkflowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            analyze_url_from_env_value(Some("not a url".into())),
            Err(WorkflowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = WorkflowConfig::from_env_values(
            None,
            Some("ftp://example.org/analyze".into()),
            None,
            None,
        );
        assert!(matches!(result, Err(WorkflowError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = WorkflowConfig::from_env_values(None, None, Some("0".into()), None);
        assert!(matches!(result, Err(WorkflowError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_numeric_timeout_rejected() {
        let result = WorkflowConfig::from_env_values(None, None, Some("soon".into()), None);
        assert!(matches!(result, Err(WorkflowError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_values() {
        let cfg = WorkflowConfig::from_env_values(
            Some("simulated".into()),
            Some("https://analysis.example.org/api/analyze".into()),
            Some("5".into()),
            Some("250".into()),
        )
        .unwrap();

        assert_eq!(cfg.mode(), AnalysisMode::Simulated);
        assert_eq!(cfg.analyze_url().host_str(), Some("analysis.example.org"));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.simulated_delay(), Duration::from_millis(250));
    }
}
