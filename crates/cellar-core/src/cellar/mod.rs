//! High-level async API over the cellar.
//!
//! [`Cellar`] is the entry point for every interface. Pure work (profile
//! estimation, scoring, composition) runs inline; store work runs on the
//! blocking pool with a fresh connection per call.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI / MCP     │    │     Cellar      │    │    Database     │
//! │                 │───▶│ (wine_ops,      │───▶│   (via db/)     │
//! │                 │    │  plan_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use cellar_core::{
//!     models::{FoodProfile, Protein},
//!     params::ComposeLineup,
//!     CellarBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cellar = CellarBuilder::new()
//!     .with_database_path(Some("/tmp/cellar.db"))
//!     .build()
//!     .await?;
//!
//! let plan = cellar
//!     .plan_evening(&ComposeLineup {
//!         owner: "me".to_string(),
//!         food: Some(FoodProfile::new(Protein::Lamb)),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    config::EngineConfig,
    db::Database,
    error::{CellarError, Result},
};

pub mod builder;
pub mod plan_ops;
pub mod wine_ops;


pub use builder::CellarBuilder;

/// Main interface for the collection and evening plans.
pub struct Cellar {
    pub(crate) db_path: PathBuf,
    pub(crate) config: Arc<EngineConfig>,
}

impl Cellar {
    pub(crate) fn new(db_path: PathBuf, config: EngineConfig) -> Self {
        Self {
            db_path,
            config: Arc::new(config),
        }
    }

    /// Configuration the cellar composes lineups with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| CellarError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
