use crate::wire::HealthRes;

/// Health check shared by the analysis service and anything that embeds it
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MediMind Diagnostics API is alive".into(),
        }
    }
}
