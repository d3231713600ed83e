use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ComposeArgs, HistoryArgs, PlanCommands, WineCommands};

/// Plan an evening of wine from your own cellar
///
/// Cellar keeps track of the bottles you own, picks a lineup for the evening
/// that suits the food and the group, orders it from light to bold, and
/// follows along as the bottles are poured. It runs as a command-line tool or
/// as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "cellar")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cellar/cellar.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the engine configuration file. Defaults to
    /// $XDG_CONFIG_HOME/cellar/config.toml when it exists
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Owner of the collection to work with
    #[arg(long, global = true, env = "CELLAR_OWNER", default_value = "me")]
    pub owner: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cellar CLI
///
/// Without a command, the active evening plan is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the wines in the collection
    #[command(alias = "w")]
    Wine {
        #[command(subcommand)]
        command: WineCommands,
    },
    /// Compose a lineup without starting a plan
    #[command(alias = "l")]
    Lineup(ComposeArgs),
    /// Start and follow evening plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show which bottles were opened
    #[command(alias = "h")]
    History(HistoryArgs),
    /// Start the MCP server
    Serve,
}
