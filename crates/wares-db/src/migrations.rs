//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::WaresDb;
use crate::error::StoreError;

/// Initial schema: the `items` table plus indexes on the filterable columns.
const MIGRATION_001: &str = include_str!("../migrations/001_items.sql");

impl WaresDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_items: {e}")))?;
        Ok(())
    }
}
