//! Cache Module
//!
//! Provides an in-process key-value cache with TTL expiration.

mod item;
mod store;


// Re-export public types
pub(crate) use item::Item;
pub use store::Cache;
