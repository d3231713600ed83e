//! MCP server implementation for Cellar
//!
//! Exposes the collection, lineup composition and evening plans as Model
//! Context Protocol tools over stdio.

use std::sync::Arc;

use anyhow::Result;
use cellar_core::Cellar;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddWine, CompletePlan, ComposeLineup, ListOpenings, ListWines, McpResult, MoveCursor, Owner,
    PlanRef, StartPlan, UpdateQueue,
};

/// MCP server for Cellar
#[derive(Clone)]
pub struct CellarMcpServer {
    cellar: Arc<Cellar>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CellarMcpServer {
    pub fn new(cellar: Cellar) -> Self {
        Self {
            cellar: Arc::new(cellar),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.cellar.clone())
    }

    #[tool(
        name = "add_wine",
        description = "Add a wine to an owner's collection. Requires owner, name and color ('red', 'white', 'rose', 'sparkling'). Optional: vintage, region, style, abv, quantity (default 1), readiness ('READY', 'PEAK_SOON', 'HOLD', 'UNKNOWN'), rating (0-5) and a known profile. Missing profiles are estimated from color, ABV, region and style."
    )]
    async fn add_wine(&self, Parameters(params): Parameters<AddWine>) -> McpResult {
        self.handlers().add_wine(params.as_ref()).await
    }

    #[tool(
        name = "list_wines",
        description = "List an owner's wines. Filter by color, min_rating, or in_stock=true to hide wines with no bottles left."
    )]
    async fn list_wines(&self, Parameters(params): Parameters<ListWines>) -> McpResult {
        self.handlers().list_wines(params.as_ref()).await
    }

    #[tool(
        name = "compose_lineup",
        description = "Suggest a lineup from an owner's in-stock wines without starting a plan. group_size ('small', 'medium', 'large') sets the number of pours. Give a food profile (protein, optional fat, sauce, spice, smoke) to favor wines that suit the dish. Pass a seed for a reproducible result. An empty lineup means nothing qualifies yet; it is not an error."
    )]
    async fn compose_lineup(&self, Parameters(params): Parameters<ComposeLineup>) -> McpResult {
        self.handlers().compose_lineup(params.as_ref()).await
    }

    #[tool(
        name = "start_plan",
        description = "Start an evening plan from an explicit lineup (slots with position 1..n, item_id, name, label, locked). Any plan the owner already has running is cancelled."
    )]
    async fn start_plan(&self, Parameters(params): Parameters<StartPlan>) -> McpResult {
        self.handlers().start_plan(params.as_ref()).await
    }

    #[tool(
        name = "plan_evening",
        description = "Compose a lineup and start an evening plan from it in one step. Takes the same arguments as compose_lineup. Any plan the owner already has running is cancelled."
    )]
    async fn plan_evening(&self, Parameters(params): Parameters<ComposeLineup>) -> McpResult {
        self.handlers().plan_evening(params.as_ref()).await
    }

    #[tool(
        name = "get_active_plan",
        description = "Show the owner's active evening plan with its lineup, the pour currently being served and the plan version. Use the version as expected_version on later writes."
    )]
    async fn get_active_plan(&self, Parameters(params): Parameters<Owner>) -> McpResult {
        self.handlers().get_active_plan(params.as_ref()).await
    }

    #[tool(
        name = "move_plan_cursor",
        description = "Move an active plan to the pour at a 0-based index. Out-of-range indexes are rejected. Pass expected_version to fail instead of overwriting a change made elsewhere."
    )]
    async fn move_plan_cursor(&self, Parameters(params): Parameters<MoveCursor>) -> McpResult {
        self.handlers().move_plan_cursor(params.as_ref()).await
    }

    #[tool(
        name = "update_plan_queue",
        description = "Replace the lineup of an active plan. The new queue must number positions 1..n and be long enough to keep the current pour."
    )]
    async fn update_plan_queue(&self, Parameters(params): Parameters<UpdateQueue>) -> McpResult {
        self.handlers().update_plan_queue(params.as_ref()).await
    }

    #[tool(
        name = "complete_plan",
        description = "Finish an evening. List an outcome per opened slot: position, quantity (default 1), optional rating (0-5) and notes. Opened bottles leave the cellar and are recorded in the history, all or nothing. If stock is short or the plan changed, nothing is written: fetch the plan again and retry."
    )]
    async fn complete_plan(&self, Parameters(params): Parameters<CompletePlan>) -> McpResult {
        self.handlers().complete_plan(params.as_ref()).await
    }

    #[tool(
        name = "cancel_plan",
        description = "Abandon an active plan. The cellar and the history are left untouched."
    )]
    async fn cancel_plan(&self, Parameters(params): Parameters<PlanRef>) -> McpResult {
        self.handlers().cancel_plan(params.as_ref()).await
    }

    #[tool(
        name = "list_openings",
        description = "Show which bottles an owner has opened, newest first, optionally for a single wine (item_id)."
    )]
    async fn list_openings(&self, Parameters(params): Parameters<ListOpenings>) -> McpResult {
        self.handlers().list_openings(params.as_ref()).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CellarMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cellar".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Cellar plans an evening of wine from an owner's own collection.

## Core Concepts
- **Wines**: bottles in the collection, with readiness, rating and a taste profile (estimated when unknown)
- **Lineup**: the pours picked for the evening, ordered from light to bold
- **Evening plan**: a lineup being worked through, with a cursor on the pour being served

## Typical Evening
1. `add_wine` for anything new in the cellar
2. `plan_evening` with the group size and the dish being served
3. `move_plan_cursor` as each pour is served
4. `complete_plan` with what was opened and how it rated

## Concurrency
Plans carry a version. Pass it as `expected_version` on writes; if another client changed the plan first the write is rejected and should be retried after `get_active_plan`."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: CellarMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Cellar MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
