//! Core library for the cellar evening planner.
//!
//! This crate scores the wines in a collection for readiness and food fit,
//! composes them into a lineup sequenced from light to bold, and tracks the
//! resulting evening plan as the bottles are poured.
//!
//! # Layers
//!
//! - **Scoring** ([`estimator`], [`scoring`], [`composer`]): pure and
//!   synchronous; no I/O, randomness only through a caller-provided RNG
//! - **Models** ([`models`]): data types and the plan state machine
//! - **Store** ([`db`]): SQLite persistence with version-checked plan writes
//! - **Facade** ([`Cellar`]): async API used by the CLI and the MCP server
//! - **Display** ([`display`]): markdown formatting shared by every interface
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cellar_core::{
//!     models::{FoodProfile, Protein, Readiness, WineColor},
//!     params::{AddWine, ComposeLineup},
//!     CellarBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cellar = CellarBuilder::new()
//!     .with_database_path(Some("cellar.db"))
//!     .build()
//!     .await?;
//!
//! let mut wine = AddWine::new("me", "Barolo", WineColor::Red);
//! wine.readiness = Readiness::Ready;
//! wine.region = Some("Piedmont".to_string());
//! cellar.add_wine(&wine).await?;
//!
//! let lineup = cellar
//!     .compose_lineup(&ComposeLineup {
//!         owner: "me".to_string(),
//!         food: Some(FoodProfile::new(Protein::Beef)),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{lineup}");
//! # Ok(())
//! # }
//! ```

pub mod cellar;
pub mod composer;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod estimator;
pub mod models;
pub mod params;
pub mod scoring;

// Re-export commonly used types
pub use cellar::{Cellar, CellarBuilder};
pub use composer::LineupComposer;
pub use config::{EngineConfig, GroupSize};
pub use db::Database;
pub use display::{
    CreateResult, Lineup, LocalDateTime, OperationStatus, Openings, Plans, UpdateResult, Wines,
};
pub use error::{CellarError, Result};
pub use models::{
    EveningPlan, FoodProfile, LineupSlot, Opening, PlanStatus, Readiness, SlotOutcome, Wine,
    WineColor, WineProfile,
};
pub use params::{
    AddWine, ComposeLineup, CompletePlan, Id, ListOpenings, ListPlans, ListWines, MoveCursor,
    Owner, PlanRef, StartPlan, UpdateQueue,
};
