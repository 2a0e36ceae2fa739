//! Local caching module for offline data access.
//!
//! This module provides the `CacheStore` for persisting the last successful
//! asset list fetch and the offline-mode flag. Data is stored as JSON and is
//! never expired by age: whenever a snapshot is present it is considered
//! servable, however old it is.

pub mod store;

pub use store::{CacheStore, CachedSnapshot};
