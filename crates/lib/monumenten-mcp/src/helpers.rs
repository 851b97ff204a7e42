use std::borrow::Cow;

use monumenten_core::status::StatusError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps a status lookup failure onto an MCP tool error.
pub fn map_status_err(err: StatusError) -> ErrorData {
    match err {
        StatusError::InvalidIdentifier(_) => mcp_err(ErrorCode::INVALID_PARAMS, err.to_string()),
        StatusError::Closed
        | StatusError::Sparql(_)
        | StatusError::Encode(_)
        | StatusError::Source(_) => mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()),
    }
}
