//! # API Shared
//!
//! The wire contract between the diagnostics client and the analysis service.
//!
//! Contains:
//! - Request/response bodies (`wire` module)
//! - Multipart field names and route paths
//! - Shared services like `HealthService`
//!
//! Used by `medimind-core` (client side) and `api-rest` (reference service).

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;

/// Multipart field carrying one uploaded file. Repeated once per file.
pub const FILES_FIELD: &str = "files";

/// Multipart field carrying the symptom list as a JSON array of strings.
pub const SYMPTOMS_FIELD: &str = "symptoms";

/// Multipart field carrying the free-text medical history.
pub const MEDICAL_HISTORY_FIELD: &str = "medical_history";

/// Route the client posts submissions to.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Route the original analysis backend exposed for the same operation.
pub const DIAGNOSE_PATH: &str = "/api/diagnose";

pub const HEALTH_PATH: &str = "/health";
