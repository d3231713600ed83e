//! Database schema initialization and migrations.

use log::info;

use crate::error::{Result, StoreResultExt};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .store_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Brings databases created by earlier releases up to date.
    fn apply_migrations(&self) -> Result<()> {
        // Cached profiles arrived after the first release of the wines table
        let has_profile_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('wines') WHERE name = 'profile'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .store_context("Failed to inspect wines table")?;

        if !has_profile_column {
            info!("Adding profile column to wines table");
            self.connection
                .execute("ALTER TABLE wines ADD COLUMN profile TEXT", [])
                .store_context("Failed to add profile column to wines table")?;
        }

        Ok(())
    }
}
