//! Cellar CLI Application
//!
//! Command-line interface and MCP server for planning an evening of wine.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cellar_core::CellarBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, CellarMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config,
        owner,
        no_color,
        command,
    } = Args::parse();

    let cellar = CellarBuilder::new()
        .with_database_path(database_file)
        .with_config_path(config)
        .build()
        .await
        .context("Failed to initialize cellar")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Cellar started for {owner}");

    match command {
        Some(Wine { command }) => {
            Cli::new(cellar, renderer, owner)
                .handle_wine_command(command)
                .await
        }
        Some(Lineup(args)) => Cli::new(cellar, renderer, owner).compose_lineup(args).await,
        Some(Plan { command }) => {
            Cli::new(cellar, renderer, owner)
                .handle_plan_command(command)
                .await
        }
        Some(History(args)) => Cli::new(cellar, renderer, owner).show_history(args).await,
        Some(Serve) => {
            info!("Starting Cellar MCP server");
            run_stdio_server(CellarMcpServer::new(cellar))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(cellar, renderer, owner).show_plan(None).await,
    }
}
