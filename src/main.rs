use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_mcp::McpServer;
use mch_core::{config_from_env_values, constants::DEFAULT_REST_ADDR};

/// Main entry point for the MCH application
///
/// Starts the REST server and, when enabled, the tool server on stdio:
/// - REST server on port 5001 (configurable via MCH_REST_ADDR)
/// - JSON-RPC tool server on stdin/stdout when `MCH_MCP_STDIO` is `true`
///
/// Both surfaces share one configuration and call the same services. Logs go to stderr so they
/// never interleave with protocol output.
///
/// # Environment Variables
/// - `MCH_REST_ADDR`: REST server address (default: "0.0.0.0:5001")
/// - `MCH_MCP_STDIO`: serve the tool protocol on stdio as well (default: off)
/// - `MCH_SERVER_BASE_URL`: Base URL used in questionnaire canonical URLs
/// - `MCH_GUIDELINE_BASE_URL`: Base URL for guideline references
///
/// # Returns
/// * `Ok(())` - If the servers start and run successfully
/// * `Err(anyhow::Error)` - If configuration, startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mch_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("api_mcp=info".parse()?)
                .add_directive("mch_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let rest_addr = std::env::var("MCH_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let mcp_stdio = std::env::var("MCH_MCP_STDIO")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);

    let cfg = Arc::new(config_from_env_values(
        std::env::var("MCH_SERVER_BASE_URL").ok(),
        std::env::var("MCH_GUIDELINE_BASE_URL").ok(),
    )?);

    tracing::info!("++ Starting MCH REST on {}", rest_addr);

    let rest_app = api_rest::router(cfg.clone());
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    let rest_server = async move { axum::serve(listener, rest_app).await };

    if mcp_stdio {
        tracing::info!("++ Starting MCH tool server on stdio");
        let mcp_server = McpServer::new(cfg).serve_stdio();

        // Run both
        let (rest_result, mcp_result) = tokio::join!(rest_server, mcp_server);
        rest_result.map_err(anyhow::Error::from)?;
        mcp_result?;
    } else {
        rest_server.await?;
    }

    Ok(())
}
