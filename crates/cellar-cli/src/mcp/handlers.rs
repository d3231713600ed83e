//! MCP tool handlers implementation

use std::sync::Arc;

use cellar_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    params as core, Cellar,
};
use log::debug;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// The core crate derives `JsonSchema` behind its `schema` feature; this
/// wrapper passes schema generation and deserialization straight through, so
/// each tool takes the core type without a hand-written mirror struct.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type AddWine = McpParams<core::AddWine>;
pub type ListWines = McpParams<core::ListWines>;
pub type ComposeLineup = McpParams<core::ComposeLineup>;
pub type StartPlan = McpParams<core::StartPlan>;
pub type Owner = McpParams<core::Owner>;
pub type MoveCursor = McpParams<core::MoveCursor>;
pub type UpdateQueue = McpParams<core::UpdateQueue>;
pub type CompletePlan = McpParams<core::CompletePlan>;
pub type PlanRef = McpParams<core::PlanRef>;
pub type ListOpenings = McpParams<core::ListOpenings>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(markdown)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    cellar: Arc<Cellar>,
}

impl McpHandlers {
    pub fn new(cellar: Arc<Cellar>) -> Self {
        Self { cellar }
    }

    pub async fn add_wine(&self, params: &core::AddWine) -> McpResult {
        debug!("add_wine: {params:?}");
        let wine = self
            .cellar
            .add_wine(params)
            .await
            .map_err(|e| to_mcp_error("Failed to add wine", &e))?;
        text(CreateResult::new(wine).to_string())
    }

    pub async fn list_wines(&self, params: &core::ListWines) -> McpResult {
        debug!("list_wines: {params:?}");
        let wines = self
            .cellar
            .list_wines(params)
            .await
            .map_err(|e| to_mcp_error("Failed to list wines", &e))?;
        text(format!("# Wines\n\n{wines}"))
    }

    pub async fn compose_lineup(&self, params: &core::ComposeLineup) -> McpResult {
        debug!("compose_lineup: {params:?}");
        let lineup = self
            .cellar
            .compose_lineup(params)
            .await
            .map_err(|e| to_mcp_error("Failed to compose lineup", &e))?;
        text(format!("# Lineup\n\n{lineup}"))
    }

    pub async fn start_plan(&self, params: &core::StartPlan) -> McpResult {
        debug!("start_plan: {params:?}");
        let plan = self
            .cellar
            .start_plan(params)
            .await
            .map_err(|e| to_mcp_error("Failed to start plan", &e))?;
        text(CreateResult::new(plan).to_string())
    }

    pub async fn plan_evening(&self, params: &core::ComposeLineup) -> McpResult {
        debug!("plan_evening: {params:?}");
        let plan = self
            .cellar
            .plan_evening(params)
            .await
            .map_err(|e| to_mcp_error("Failed to plan evening", &e))?;
        text(CreateResult::new(plan).to_string())
    }

    pub async fn get_active_plan(&self, params: &core::Owner) -> McpResult {
        debug!("get_active_plan: {params:?}");
        let plan = self
            .cellar
            .get_active_plan(params)
            .await
            .map_err(|e| to_mcp_error("Failed to load active plan", &e))?;
        match plan {
            Some(plan) => text(plan.to_string()),
            None => text(format!("No active plan for {}.\n", params.owner)),
        }
    }

    pub async fn move_plan_cursor(&self, params: &core::MoveCursor) -> McpResult {
        debug!("move_plan_cursor: {params:?}");
        let plan = self
            .cellar
            .move_plan_cursor(params)
            .await
            .map_err(|e| to_mcp_error("Failed to move cursor", &e))?;
        let changes = plan
            .now_playing()
            .map(|slot| vec![format!("Now pouring #{}: {}", slot.position, slot.name)])
            .unwrap_or_default();
        text(UpdateResult::with_changes(plan, changes).to_string())
    }

    pub async fn update_plan_queue(&self, params: &core::UpdateQueue) -> McpResult {
        debug!("update_plan_queue: {params:?}");
        let plan = self
            .cellar
            .update_plan_queue(params)
            .await
            .map_err(|e| to_mcp_error("Failed to update queue", &e))?;
        text(UpdateResult::new(plan).to_string())
    }

    pub async fn complete_plan(&self, params: &core::CompletePlan) -> McpResult {
        debug!("complete_plan: {params:?}");
        let plan = self
            .cellar
            .complete_plan(params)
            .await
            .map_err(|e| to_mcp_error("Failed to complete plan", &e))?;
        let changes = vec![format!(
            "Completed with {} bottle(s) opened",
            plan.bottles_opened.unwrap_or(0)
        )];
        text(UpdateResult::with_changes(plan, changes).to_string())
    }

    pub async fn cancel_plan(&self, params: &core::PlanRef) -> McpResult {
        debug!("cancel_plan: {params:?}");
        self.cellar
            .cancel_plan(params)
            .await
            .map_err(|e| to_mcp_error("Failed to cancel plan", &e))?;
        text(OperationStatus::success(format!("Cancelled plan {}", params.plan_id)).to_string())
    }

    pub async fn list_openings(&self, params: &core::ListOpenings) -> McpResult {
        debug!("list_openings: {params:?}");
        let openings = self
            .cellar
            .list_openings(params)
            .await
            .map_err(|e| to_mcp_error("Failed to list openings", &e))?;
        text(format!("# Openings\n\n{openings}"))
    }
}

#[cfg(test)]
mod tests {
    use cellar_core::{models::WineColor, CellarBuilder};
    use rmcp::model::ErrorCode;
    use tempfile::TempDir;

    use super::*;

    async fn create_test_handlers() -> (TempDir, McpHandlers) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cellar = CellarBuilder::new()
            .with_database_path(Some(temp_dir.path().join("test.db")))
            .build()
            .await
            .expect("Failed to create cellar");
        (temp_dir, McpHandlers::new(Arc::new(cellar)))
    }

    #[tokio::test]
    async fn test_plan_evening_and_cancel() {
        let (_temp_dir, handlers) = create_test_handlers().await;
        for name in ["Soave", "Chianti"] {
            let color = if name == "Soave" {
                WineColor::White
            } else {
                WineColor::Red
            };
            let result = handlers
                .add_wine(&core::AddWine::new("me", name, color))
                .await;
            assert!(result.is_ok());
        }

        let compose = core::ComposeLineup {
            owner: "me".to_string(),
            ..Default::default()
        };
        assert!(handlers.plan_evening(&compose).await.is_ok());

        let plan = handlers
            .cellar
            .get_active_plan(&core::Owner {
                owner: "me".to_string(),
            })
            .await
            .unwrap()
            .expect("Active plan");
        assert_eq!(plan.queue.len(), 2);

        let cancel = core::PlanRef {
            plan_id: plan.id,
            expected_version: Some(plan.version),
        };
        assert!(handlers.cancel_plan(&cancel).await.is_ok());

        let err = handlers.cancel_plan(&cancel).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_plan_evening_with_empty_cellar_is_invalid_params() {
        let (_temp_dir, handlers) = create_test_handlers().await;
        let err = handlers
            .plan_evening(&core::ComposeLineup {
                owner: "me".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Nothing qualifies yet"));
    }

    #[test]
    fn test_params_deserialize_through_wrapper() {
        let params: CompletePlan = serde_json::from_str(
            r#"{"plan_id": 4, "outcomes": [{"position": 1, "rating": 4.5}]}"#,
        )
        .unwrap();
        let inner = params.as_ref();
        assert_eq!(inner.plan_id, 4);
        assert_eq!(inner.outcomes[0].quantity, 1);
        assert!(inner.expected_version.is_none());
    }
}
