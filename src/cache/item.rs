//! Cache Item Module
//!
//! Defines the structure for individual cache items with expiration support.

use std::time::{Duration, Instant};

// == Cache Item ==
/// A stored value together with its absolute expiration instant.
#[derive(Debug, Clone)]
pub(crate) struct Item<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expiration: Option<Instant>,
}

impl<V> Item<V> {
    // == Constructor ==
    /// Creates a new item expiring `ttl` from now.
    ///
    /// A zero `ttl` produces an item that never expires.
    pub fn new(value: V, ttl: Duration) -> Self {
        let expiration = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        Self { value, expiration }
    }

    // == Is Expired ==
    /// Checks if the item has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks if the item has expired as of `now`.
    ///
    /// An item is expired strictly after its expiration instant; items
    /// without an expiration never are.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expiration {
            Some(expires) => now > expires,
            None => false,
        }
    }
}
