use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ServerConfig;
use medimind_core::WorkflowConfig;

/// Main entry point for MediMind
///
/// Serves the reference analysis service. The client-side workflow configuration is resolved
/// and logged as well so a misconfigured `.env` shows up at startup rather than on the first
/// submission.
///
/// # Environment Variables
/// - `MEDIMIND_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `MEDIMIND_MAX_UPLOAD_BYTES`: Upload limit in bytes (default: 25 MiB)
/// - `MEDIMIND_ANALYSIS_MODE`: `remote` or `simulated` (default: `remote`)
/// - `MEDIMIND_ANALYZE_URL`: Endpoint the client posts to
/// - `MEDIMIND_REQUEST_TIMEOUT_SECS`: Client request bound (default: 30)
/// - `MEDIMIND_SIMULATED_DELAY_MS`: Simulated answer delay (default: 3000)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medimind=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_cfg = ServerConfig::from_env()?;
    let workflow_cfg = WorkflowConfig::from_env()?;

    tracing::info!(
        mode = %workflow_cfg.mode(),
        analyze_url = %workflow_cfg.analyze_url(),
        timeout_secs = workflow_cfg.request_timeout().as_secs(),
        "client workflow configuration"
    );

    api_rest::serve(server_cfg).await?;

    Ok(())
}
