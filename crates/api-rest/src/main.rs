//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `mch-run` binary can also serve the tool protocol
//! over stdio alongside it.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mch_core::{config_from_env_values, constants::DEFAULT_REST_ADDR};

/// Main entry point for the MCH REST API server
///
/// # Environment Variables
/// - `MCH_REST_ADDR`: Server address (default: "0.0.0.0:5001")
/// - `MCH_SERVER_BASE_URL`: Base URL used in questionnaire canonical URLs
/// - `MCH_GUIDELINE_BASE_URL`: Base URL for guideline references
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configured base URLs are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("mch_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MCH_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(config_from_env_values(
        std::env::var("MCH_SERVER_BASE_URL").ok(),
        std::env::var("MCH_GUIDELINE_BASE_URL").ok(),
    )?);

    tracing::info!("-- Starting MCH REST API on {}", addr);
    tracing::info!(
        server_base_url = cfg.server_base_url(),
        guideline_base_url = cfg.guideline_base_url(),
        "configuration resolved"
    );

    let app = api_rest::router(cfg);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
