//! Constants used throughout the MediMind core crate.

/// Analysis endpoint used when no address is configured.
pub const DEFAULT_ANALYZE_URL: &str = "http://127.0.0.1:8000/api/analyze";

/// Upper bound on a single analysis call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay before the simulated transport answers, in milliseconds.
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 3_000;

/// Longest response body kept in a [`crate::TransportError::Status`] message.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Symptoms offered as one-click additions.
pub const COMMON_SYMPTOMS: [&str; 10] = [
    "Headache",
    "Fever",
    "Cough",
    "Fatigue",
    "Shortness of breath",
    "Chest pain",
    "Nausea",
    "Dizziness",
    "Back pain",
    "Joint pain",
];

pub const ENV_ANALYSIS_MODE: &str = "MEDIMIND_ANALYSIS_MODE";
pub const ENV_ANALYZE_URL: &str = "MEDIMIND_ANALYZE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MEDIMIND_REQUEST_TIMEOUT_SECS";
pub const ENV_SIMULATED_DELAY_MS: &str = "MEDIMIND_SIMULATED_DELAY_MS";
