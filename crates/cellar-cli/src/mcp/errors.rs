//! Error mapping for the MCP server

use cellar_core::CellarError;
use rmcp::ErrorData;

/// Converts a cellar error into an MCP error.
///
/// Bad arguments become `invalid_params`. Conflicts and short stock become
/// `invalid_request` with a hint to re-read the plan, since retrying against
/// fresh state is expected to succeed.
pub fn to_mcp_error(message: &str, error: &CellarError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        CellarError::InvalidInput { .. }
        | CellarError::InvalidPosition { .. }
        | CellarError::InvalidTransition { .. }
        | CellarError::PlanNotFound { .. }
        | CellarError::WineNotFound { .. } => ErrorData::invalid_params(text, None),
        CellarError::Conflict { .. } | CellarError::InsufficientQuantity { .. } => {
            ErrorData::invalid_request(
                format!("{text}. Fetch the plan again with get_active_plan and retry"),
                None,
            )
        }
        _ => ErrorData::internal_error(text, None),
    }
}
