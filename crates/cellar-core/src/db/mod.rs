//! SQLite store for the collection, evening plans and opening history.
//!
//! Each query module adds methods to [`Database`]. Multi-row writes run in a
//! single transaction; plan writes are conditional on the plan's version.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{Result, StoreResultExt};

pub mod migrations;
pub mod plan_queries;
pub mod utils;
pub mod wine_queries;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).store_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .store_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
