//! # wares-core
//!
//! Core types for the wares item service.
//!
//! This crate provides the types shared across the workspace:
//! - Entity structs (`Item`, `MetadataRecord`, the audit document)
//! - Allow-list enums for dynamic query construction (`ItemColumn`, `SortOrder`)
//! - The authenticated request context passed down from the transport layer
//! - Paging request/response types with input validation

pub mod context;
pub mod entities;
pub mod enums;
pub mod paging;
