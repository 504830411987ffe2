//! Service layer orchestrating the item repository with the audit log.
//!
//! `WaresService` wraps `WaresDb` (relational store) and `AuditLog` (file
//! persistence). Repo methods are implemented as `impl WaresService` blocks in
//! [`crate::repos`].
//!
//! Every mutation follows this protocol:
//! 1. Validate input
//! 2. Execute SQL
//! 3. Append the metadata record to the audit log
//! 4. Return the repository result
//!
//! An audit-append failure after a successful write is surfaced as an error;
//! the row is NOT rolled back. The two stores are not atomic with each other.

use std::path::PathBuf;

use wares_config::WaresConfig;

use crate::WaresDb;
use crate::audit::AuditLog;
use crate::error::StoreError;

/// Orchestrates item mutations with audit log appends.
pub struct WaresService {
    db: WaresDb,
    audit: AuditLog,
}

impl WaresService {
    /// Create a service over a local database and audit log path.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for
    ///   tests.
    /// * `audit_path` — Path of the JSON audit document; created lazily.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        audit_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let db = WaresDb::open_local(db_path).await?;
        let audit = AuditLog::new(audit_path);
        Ok(Self { db, audit })
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn from_config(config: &WaresConfig) -> Result<Self, StoreError> {
        Self::new_local(&config.database.path, &config.audit.log_path).await
    }

    /// Create from existing parts (for testing).
    #[must_use]
    pub const fn from_parts(db: WaresDb, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &WaresDb {
        &self.db
    }

    /// Access the audit log.
    #[must_use]
    pub const fn audit(&self) -> &AuditLog {
        &self.audit
    }
}
