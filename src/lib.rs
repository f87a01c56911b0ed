//! TTL Cache - A lightweight in-process key-value cache
//!
//! Thread-safe storage with per-item expiration, lazy eviction on read and an
//! optional background sweeper.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::Cache;
pub use config::Options;
pub use error::{CacheError, Result};
pub use tasks::SweeperState;
