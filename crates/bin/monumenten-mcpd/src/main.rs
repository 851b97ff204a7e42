//! Daemon entry point for the monumenten MCP server.
//!
//! Loads configuration from `.env`, the environment and CLI arguments, then
//! serves the MCP protocol over stdio or streamable HTTP.

mod config;
mod logging;

use monumenten_core::sparql::SparqlClient;
use monumenten_mcp::MonumentenMcp;
use monumenten_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;

use crate::config::{MonumentenConfig, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();
    let config = MonumentenConfig::from_args()?;
    logging::init(config.transport, config.log_level);

    let client = SparqlClient::new(config.sparql_endpoint.clone())
        .with_timeout(config.request_timeout);
    info!(
        endpoint = client.endpoint(),
        timeout = ?client.timeout(),
        "using SPARQL endpoint"
    );

    let service = MonumentenMcp::kadaster(client).with_name(config.name.clone());
    info!(
        name = service.name(),
        transport = %config.transport,
        "starting MCP server"
    );

    match config.transport {
        Transport::Stdio => serve_stdio(service).await,
        Transport::Http => {
            info!(
                addr = %config.http_addr,
                stateless = config.stateless,
                "serving streamable HTTP"
            );
            let http_config =
                McpHttpServerConfig::new(config.http_addr).with_stateful_mode(!config.stateless);
            serve_streamable_http(service, http_config).await
        }
    }
}
