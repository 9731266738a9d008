//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the reference analysis service on its own.
//!
//! ## Intended use
//! Useful when working on the service alone. The workspace's main `medimind-run` binary serves
//! the same router.

use api_rest::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MediMind REST API server
///
/// # Environment Variables
/// - `MEDIMIND_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `MEDIMIND_MAX_UPLOAD_BYTES`: Upload limit in bytes (default: 25 MiB)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env()?;
    api_rest::serve(cfg).await?;

    Ok(())
}
