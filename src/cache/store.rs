//! Cache Store Module
//!
//! Main cache engine: a HashMap behind a reader/writer lock, with lazy
//! expiration on read and an optional background sweeper.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::cache::Item;
use crate::config::Options;
use crate::error::{CacheError, Result};
use crate::tasks::{Sweep, Sweeper, SweeperState};

// == Shared State ==
/// State shared by every handle of one cache and, weakly, by its sweeper.
pub(crate) struct Shared<V> {
    /// Key-value storage
    items: RwLock<HashMap<String, Item<V>>>,
    /// Construction parameters
    options: Options,
    /// Background sweeper, None when no cleanup interval was configured
    sweeper: Option<Sweeper>,
}

impl<V> Shared<V> {
    // Lock poisoning is recovered: no operation panics while the map is
    // half-updated, so the inner map is always consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Item<V>>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Item<V>>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes every item expired as of the start of the pass.
    fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let mut items = self.write();
        let before = items.len();
        items.retain(|_, item| !item.is_expired_at(now));
        before - items.len()
    }
}

impl<V: Send + Sync + 'static> Sweep for Shared<V> {
    fn sweep(&self) -> usize {
        self.remove_expired()
    }
}

// == Cache Store ==
/// Thread-safe in-process cache with per-item expiration.
///
/// `Cache` is a cheap handle: clones address the same underlying map. Values
/// are returned as clones, so wrap large payloads in `Arc`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::{Cache, CacheError, Options};
///
/// let cache: Cache<i32> = Cache::new(Options::new().default_expiration(Duration::from_secs(60)));
/// cache.set("answer", 42).unwrap();
/// assert_eq!(cache.get("answer"), Ok(42));
/// assert_eq!(cache.set("answer", None), Err(CacheError::NilValue));
/// ```
pub struct Cache<V> {
    shared: Arc<Shared<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("item_count", &self.shared.read().len())
            .field("options", &self.shared.options)
            .finish()
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new cache.
    ///
    /// If `options.cleanup_interval` is positive a background sweeper is
    /// started right away on its own thread, independent of any Tokio
    /// runtime the caller may be running in.
    pub fn new(options: Options) -> Self {
        let interval = options.cleanup_interval;
        let sweeper = (!interval.is_zero()).then(|| Sweeper::new(interval));

        let shared = Arc::new(Shared {
            items: RwLock::new(HashMap::new()),
            options,
            sweeper,
        });

        if let Some(sweeper) = &shared.sweeper {
            sweeper.start(Arc::downgrade(&shared));
        }

        Self { shared }
    }

    // == Set ==
    /// Stores a value under `key` using the default expiration.
    ///
    /// Passing `None` fails with [`CacheError::NilValue`] and leaves any
    /// existing entry untouched.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Option<V>>) -> Result<()> {
        self.set_with_expiration(key, value, self.shared.options.default_expiration)
    }

    /// Stores a value under `key` expiring after `duration`.
    ///
    /// A zero `duration` means the entry never expires, regardless of the
    /// default expiration. A `duration` too large to add to the current
    /// instant also yields an entry that never expires. An existing entry is
    /// replaced wholesale.
    pub fn set_with_expiration(
        &self,
        key: impl Into<String>,
        value: impl Into<Option<V>>,
        duration: Duration,
    ) -> Result<()> {
        let value = value.into().ok_or(CacheError::NilValue)?;
        self.insert(key.into(), value, duration);
        Ok(())
    }

    fn insert(&self, key: String, value: V, duration: Duration) {
        let item = Item::new(value, duration);
        self.shared.write().insert(key, item);
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// An expired entry is removed on the way out and reported as
    /// [`CacheError::KeyExpired`].
    pub fn get(&self, key: &str) -> Result<V> {
        {
            let items = self.shared.read();
            match items.get(key) {
                None => return Err(CacheError::KeyNotFound(key.to_string())),
                Some(item) if !item.is_expired() => return Ok(item.value.clone()),
                Some(_) => {}
            }
        }

        self.evict_if_expired(key);
        Err(CacheError::KeyExpired(key.to_string()))
    }

    /// Removes `key` only if the entry currently stored is expired.
    ///
    /// The entry may have been replaced between the read check and taking
    /// the write lock, so expiry is checked again here.
    fn evict_if_expired(&self, key: &str) -> bool {
        let mut items = self.shared.write();
        if items.get(key).is_some_and(Item::is_expired) {
            items.remove(key);
            true
        } else {
            false
        }
    }

    // == Get Or Set ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs with no lock held and may call back into the cache. Its
    /// error is returned unchanged and nothing is stored. This is not
    /// single-flight: concurrent callers missing on the same key may each run
    /// `compute`, and the last one to finish wins the slot.
    pub fn get_or_set<F, E>(&self, key: impl Into<String>, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        let key = key.into();
        if let Ok(value) = self.get(&key) {
            return Ok(value);
        }

        let value = compute()?;
        self.insert(key, value.clone(), self.shared.options.default_expiration);
        Ok(value)
    }

    // == Delete ==
    /// Removes an entry by key, returning whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.shared.write().remove(key).is_some()
    }

    // == Delete Expired ==
    /// Removes every entry whose expiration has passed.
    pub fn delete_expired(&self) {
        self.shared.remove_expired();
    }

    // == Items ==
    /// Returns a snapshot of all entries that have not expired.
    ///
    /// Expired entries are skipped, not removed.
    pub fn items(&self) -> HashMap<String, V> {
        let now = Instant::now();
        self.shared
            .read()
            .iter()
            .filter(|(_, item)| !item.is_expired_at(now))
            .map(|(key, item)| (key.clone(), item.value.clone()))
            .collect()
    }

    // == Item Count ==
    /// Returns the number of stored entries, including expired ones not yet
    /// removed.
    pub fn item_count(&self) -> usize {
        self.shared.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    // == Flush ==
    /// Removes all entries.
    pub fn flush(&self) {
        *self.shared.write() = HashMap::new();
    }

    // == Stop ==
    /// Signals the background sweeper to terminate.
    ///
    /// Never blocks. Safe to call repeatedly, after the sweeper has exited,
    /// or on a cache built without a cleanup interval.
    pub fn stop(&self) {
        if let Some(sweeper) = &self.shared.sweeper {
            sweeper.stop();
        }
    }

    /// Reports whether the background sweeper is running.
    pub fn sweeper_state(&self) -> SweeperState {
        self.shared
            .sweeper
            .as_ref()
            .map_or(SweeperState::Disabled, Sweeper::state)
    }

    /// Returns the options this cache was built with.
    pub fn options(&self) -> &Options {
        &self.shared.options
    }
}
