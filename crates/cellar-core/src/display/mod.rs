//! Display wrappers and markdown formatting.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! This module adds newtypes for collections and wrappers for operation
//! results, so the CLI renderer and the MCP server print the same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Collections &  │    │    Markdown     │
//! │ (Wine, Plan...) │───▶│  Result Types   │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`Lineup`], [`Wines`], [`Plans`], [`Openings`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//!
//! ```rust
//! use cellar_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Cancelled plan 4".to_string());
//! assert_eq!(status.to_string(), "Success: Cancelled plan 4\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Lineup, Openings, Plans, Wines};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
