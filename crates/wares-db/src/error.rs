//! Store error types for wares-db.
//!
//! One tagged union covers the four failure classes the service surfaces:
//! validation, not-found, relational store failure, and audit storage failure.
//! `http_status()` gives the transport layer its status code without any
//! downcasting.

use thiserror::Error;
use wares_core::paging::ListQueryError;

/// Errors from repository, audit log, and service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Bad or disallowed input (unknown sort column, empty name, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No row or audit record matches.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Audit document I/O or (de)serialization failed.
    #[error("Audit storage error: {0}")]
    Storage(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// HTTP status the transport should map this error to. Everything that is
    /// neither a validation rejection nor a not-found is an opaque internal
    /// failure.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Query(_)
            | Self::Migration(_)
            | Self::Storage(_)
            | Self::LibSql(_)
            | Self::Other(_) => 500,
        }
    }

    /// Whether this is the distinct not-found case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ListQueryError> for StoreError {
    fn from(err: ListQueryError) -> Self {
        Self::Validation(err.to_string())
    }
}
