//! MCP server implementation for mcp-monumenten.
//!
//! This crate wires the address resolver and the monument status adapter
//! into rmcp tool handlers and exposes them over stdio or streamable HTTP.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use monumenten_core::address::AddressResolver;
use monumenten_core::sparql::SparqlClient;
use monumenten_core::status::{KadasterStatusSource, StatusAdapter, StatusSource};
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};

pub use tools::address::VerblijfsobjectParams;
pub use tools::status::MonumentalStatusParams;

pub const DEFAULT_SERVER_NAME: &str = "Monumenten MCP";

const SERVER_INSTRUCTIONS: &str = r"mcp-monumenten answers questions about Dutch buildings using the BAG address registry and the Rijksmonumenten register.

Workflow:
1. Resolve an address with `get_verblijfsobject_id`. Provide `house_number` and either
   `postal_code` (preferred, e.g. '3011AD') or `street` + `city`. Never combine the two modes.
   Add `house_letter` ('A' in '30A') or `house_suffix` ('2' in '30-2') to narrow the match.
2. Pass the returned `bag_verblijfsobject_id` to `get_monumental_status`.

Notes:
- An answer starting with `Ambiguous address` lists every candidate; ask the user which one is meant
  or retry with a house letter or suffix.
- Street searches need the exact registered street and city names; postal code searches are more reliable.
- When a building is a Rijksmonument, cite the Rijksdienst voor het Cultureel Erfgoed (RCE) as the source.";

/// MCP server wrapper around the address resolver and status adapter.
pub struct MonumentenMcp<S: StatusSource> {
    tool_router: ToolRouter<Self>,
    name: String,
    resolver: Arc<AddressResolver>,
    status: Arc<StatusAdapter<S>>,
}

impl<S: StatusSource> Clone for MonumentenMcp<S> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            name: self.name.clone(),
            resolver: self.resolver.clone(),
            status: self.status.clone(),
        }
    }
}

impl<S: StatusSource> MonumentenMcp<S> {
    /// Creates a new server from a resolver and a status source by value.
    #[must_use]
    pub fn new(resolver: AddressResolver, status: S) -> Self {
        Self::with_shared(Arc::new(resolver), Arc::new(StatusAdapter::new(status)))
    }

    /// Creates a new server using shared handles.
    #[must_use]
    pub fn with_shared(resolver: Arc<AddressResolver>, status: Arc<StatusAdapter<S>>) -> Self {
        let tool_router = Self::tool_router_address() + Self::tool_router_status();
        Self {
            tool_router,
            name: DEFAULT_SERVER_NAME.to_string(),
            resolver,
            status,
        }
    }

    /// Sets the display name reported to clients.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl MonumentenMcp<KadasterStatusSource> {
    /// Server whose tools both query the given knowledge graph endpoint.
    #[must_use]
    pub fn kadaster(client: SparqlClient) -> Self {
        Self::new(
            AddressResolver::new(client.clone()),
            KadasterStatusSource::new(client),
        )
    }
}

#[tool_handler]
impl<S: StatusSource> ServerHandler for MonumentenMcp<S> {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name.clone_from(&self.name);
        server_info.version = env!("CARGO_PKG_VERSION").to_string();
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info,
            ..Default::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use monumenten_core::address::AddressResolver;
    use monumenten_core::sparql::SparqlClient;
    use monumenten_core::status::{StatusClient, StatusError, StatusSource};
    use rmcp::model::CallToolResult;
    use serde_json::{Value, json};

    use crate::MonumentenMcp;

    /// Status source that answers from memory and records what it saw.
    #[derive(Default)]
    pub struct RecordingSource {
        pub forwarded: Arc<Mutex<Vec<Vec<String>>>>,
        pub fail_with: Option<String>,
    }

    pub struct RecordingClient {
        forwarded: Arc<Mutex<Vec<Vec<String>>>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl StatusSource for RecordingSource {
        type Client = RecordingClient;

        async fn open(&self) -> Result<RecordingClient, StatusError> {
            Ok(RecordingClient {
                forwarded: self.forwarded.clone(),
                fail_with: self.fail_with.clone(),
            })
        }
    }

    #[async_trait]
    impl StatusClient for RecordingClient {
        async fn process_from_list(&self, identifiers: &[String]) -> Result<Value, StatusError> {
            self.forwarded
                .lock()
                .expect("forwarded lock")
                .push(identifiers.to_vec());
            if let Some(message) = &self.fail_with {
                return Err(StatusError::Source(message.clone()));
            }
            Ok(json!([{ "bag_verblijfsobject_id": identifiers.first(), "rijksmonument": false }]))
        }

        async fn close(&mut self) -> Result<(), StatusError> {
            Ok(())
        }
    }

    pub fn server_with(endpoint: &str, source: RecordingSource) -> MonumentenMcp<RecordingSource> {
        MonumentenMcp::new(AddressResolver::new(SparqlClient::new(endpoint)), source)
    }

    pub fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|content| content.as_text())
            .map(|text| text.text.clone())
            .collect()
    }
}
