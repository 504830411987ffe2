//! Entity structs for the item store and the audit document.
//!
//! `Item` maps to the `items` table. The audit types serialize camelCase
//! because that is the shape of the persisted `logs.json` document
//! (`itemId`, `ipAddress`, `userAgent`), which predates this implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// A sellable unit. The id is store-assigned and immutable; all other fields
/// are replaceable by update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// One immutable audit entry describing a single mutation of an item.
///
/// Never mutated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub item_id: i64,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub details: MetadataDetail,
}

/// Structured payload carried by a metadata record: a snapshot of the item's
/// user-facing fields plus the request context the mutation arrived with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDetail {
    pub name: String,
    pub description: String,
    pub ip_address: String,
    pub user_agent: String,
    pub user_id: i64,
    pub username: String,
}

/// The whole audit collection as persisted: records ordered oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditDocument {
    pub items: Vec<MetadataRecord>,
}
