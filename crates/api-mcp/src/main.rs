//! Standalone tool server binary.
//!
//! Speaks JSON-RPC over stdin/stdout, so all logging is written to stderr.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_mcp::McpServer;
use mch_core::config_from_env_values;

/// # Environment Variables
/// - `MCH_SERVER_BASE_URL`: Base URL used in questionnaire canonical URLs
/// - `MCH_GUIDELINE_BASE_URL`: Base URL for guideline references
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_mcp=info".parse()?)
                .add_directive("mch_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = Arc::new(config_from_env_values(
        std::env::var("MCH_SERVER_BASE_URL").ok(),
        std::env::var("MCH_GUIDELINE_BASE_URL").ok(),
    )?);

    McpServer::new(cfg).serve_stdio().await
}
