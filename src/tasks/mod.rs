//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a cache.
//!
//! # Tasks
//! - Sweeper: Removes expired cache entries at the configured cleanup interval

mod sweeper;

pub use sweeper::SweeperState;
pub(crate) use sweeper::{Sweep, Sweeper};
