//! Repository modules implementing the item operations.
//!
//! Each module adds methods to `WaresService` via `impl WaresService` blocks.

pub mod item;
