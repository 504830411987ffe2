//! # wares-db
//!
//! libSQL-backed item repository, file-backed audit log, and the service
//! orchestrating the two.
//!
//! Uses the `libsql` crate (C `SQLite` fork) for the relational store. The
//! audit log lives outside the database as a single JSON document; see
//! [`audit::AuditLog`] for its access discipline.

pub mod audit;
pub mod error;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;

use error::StoreError;
use libsql::Builder;

/// Database handle for the item store.
///
/// Wraps a libSQL database and connection. Migrations run on open.
pub struct WaresDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl WaresDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let wares_db = Self { db, conn };
        wares_db.run_migrations().await?;
        Ok(wares_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> WaresDb {
        WaresDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='items'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some(), "items table should exist");
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again — should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn insert_and_select_item() {
        let db = test_db().await;

        db.conn()
            .execute(
                "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)",
                libsql::params!["Widget", "a widget", 9.99_f64],
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query("SELECT id, name, price FROM items WHERE name = ?1", ["Widget"])
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
        assert_eq!(row.get::<String>(1).unwrap(), "Widget");
        assert!((row.get::<f64>(2).unwrap() - 9.99).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn ids_autoincrement() {
        let db = test_db().await;

        for n in 0..3 {
            db.conn()
                .execute(
                    "INSERT INTO items (name, description, price) VALUES (?1, '', 1.0)",
                    [format!("item-{n}")],
                )
                .await
                .unwrap();
        }

        let mut rows = db
            .conn()
            .query("SELECT id FROM items ORDER BY id", ())
            .await
            .unwrap();
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            ids.push(row.get::<i64>(0).unwrap());
        }
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
