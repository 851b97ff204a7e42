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

use crate::MonumentenMcp;
use crate::helpers;

/// Parameters for a monument status lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MonumentalStatusParams {
    /// The verblijfsobject ID (16-18 digits)
    pub bag_verblijfsobject_id: String,
}

#[tool_router(router = tool_router_status, vis = "pub")]
impl<S: StatusSource> MonumentenMcp<S> {
    #[tool(
        description = "Get the monumental status of a verblijfsobject",
        annotations(read_only_hint = true, destructive_hint = false, open_world_hint = true)
    )]
    async fn get_monumental_status(
        &self,
        Parameters(params): Parameters<MonumentalStatusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .status
            .lookup(&params.bag_verblijfsobject_id)
            .await
            .map_err(helpers::map_status_err)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
