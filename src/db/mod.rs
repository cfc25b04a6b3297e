//! Storage module
//!
//! This module holds the persisted document, its persistence backends,
//! the transactional store, repositories and provisioning.

pub mod document;
pub mod persistence;
pub mod provisioning;
pub mod repositories;
pub mod store;

pub use document::Database;
pub use persistence::{JsonFilePersistence, MemoryPersistence, Persistence};
pub use provisioning::{bootstrap, seed_users};
pub use store::Store;
