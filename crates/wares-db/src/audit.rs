//! File-backed audit log store.
//!
//! The audit log is a single JSON document (`{ "items": [...] }`) rewritten
//! wholesale on every append. `AuditLog` owns the backing path exclusively and
//! serializes every load-modify-save cycle behind one async mutex, so two
//! concurrent appends can no longer overwrite each other's records.
//!
//! Every operation reads or rewrites the entire document. This only holds up
//! while audit volume stays small; the format is not built for large logs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use wares_core::entities::{AuditDocument, MetadataRecord};

use crate::error::StoreError;

/// Owns the audit document on disk and all access to it.
///
/// Exposes only load, append, and query-by-item-id. Callers never touch the
/// file directly.
pub struct AuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AuditLog {
    /// Create an audit log backed by the given path.
    ///
    /// The file itself is created lazily on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full document.
    ///
    /// If the file does not exist yet it is initialized to the empty document
    /// and that value is returned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` on any other read or parse failure.
    pub async fn load(&self) -> Result<AuditDocument, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_or_init()
    }

    /// Append one record to the document.
    ///
    /// Load, push, and rewrite happen under the writer lock as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the document cannot be read or written.
    pub async fn append(&self, record: MetadataRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_or_init()?;
        doc.items.push(record);
        self.write(&doc)?;
        tracing::debug!(path = %self.path.display(), total = doc.items.len(), "audit record appended");
        Ok(())
    }

    /// All records for one item, oldest first. An item with no history yields
    /// an empty vec; the not-found policy is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` on read or parse failure.
    pub async fn records_for_item(&self, item_id: i64) -> Result<Vec<MetadataRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.read_or_init()?;
        Ok(doc
            .items
            .into_iter()
            .filter(|record| record.item_id == item_id)
            .collect())
    }

    /// Read the document, creating it with `{ "items": [] }` if absent.
    fn read_or_init(&self) -> Result<AuditDocument, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Storage(format!(
                    "invalid audit document at {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let doc = AuditDocument::default();
                self.write(&doc)?;
                tracing::debug!(path = %self.path.display(), "initialized empty audit document");
                Ok(doc)
            }
            Err(e) => Err(StoreError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Serialize and rewrite the whole document.
    fn write(&self, doc: &AuditDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| StoreError::Storage(format!("failed to serialize audit document: {e}")))?;
        std::fs::write(&self.path, bytes).map_err(|e| {
            StoreError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}
