//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with items within the domain layer, while the underlying
//! implementation details remain in the `entity_api` crate.
pub use entity_api::item::{ItemList, PageMeta, PageParams};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{items, Id};

pub mod error;
pub mod item;
