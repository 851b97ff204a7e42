use monumenten_core::models::AddressQuery;
use monumenten_core::status::StatusSource;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::MonumentenMcp;

/// Parameters for resolving an address to a verblijfsobject id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct VerblijfsobjectParams {
    /// The house number, e.g. '30'.
    pub house_number: String,
    /// The postal code, e.g. '3011AD'. Do not combine with street and city.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// The street name, e.g. 'Coolsingel'. Requires city.
    #[serde(default)]
    pub street: Option<String>,
    /// The city name, e.g. 'Rotterdam'. Requires street.
    #[serde(default)]
    pub city: Option<String>,
    /// Optional house letter, e.g. 'A' in '30A'.
    #[serde(default)]
    pub house_letter: Option<String>,
    /// Optional house number suffix, e.g. '2' in '30-2'.
    #[serde(default)]
    pub house_suffix: Option<String>,
}

impl From<VerblijfsobjectParams> for AddressQuery {
    fn from(params: VerblijfsobjectParams) -> Self {
        Self {
            house_number: params.house_number,
            postal_code: params.postal_code,
            street: params.street,
            city: params.city,
            house_letter: params.house_letter,
            house_suffix: params.house_suffix,
        }
    }
}

#[tool_router(router = tool_router_address, vis = "pub")]
impl<S: StatusSource> MonumentenMcp<S> {
    #[tool(
        description = "Get verblijfsobject ID using address. Use postal_code + house_number OR street + house_number + city. Additional filters like house_letter and house_suffix can be provided for more precise matching.",
        annotations(read_only_hint = true, destructive_hint = false, open_world_hint = true)
    )]
    async fn get_verblijfsobject_id(
        &self,
        Parameters(params): Parameters<VerblijfsobjectParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = AddressQuery::from(params);
        let text = self.resolver.resolve(&query).await;
        debug!(chars = text.len(), "get_verblijfsobject_id answered");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
