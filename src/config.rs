//! Configuration Module
//!
//! Cache construction options, loadable from environment variables.

use std::env;
use std::time::Duration;

/// Default expiration used by `Options::from_env` when unset (5 minutes).
pub const DEFAULT_EXPIRATION_MS: u64 = 300_000;

/// Cleanup interval used by `Options::from_env` when unset (1 minute).
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 60_000;

/// Cache construction parameters.
///
/// Both durations are fixed for the lifetime of the cache. A zero
/// `default_expiration` means entries stored with `set` never expire; a zero
/// `cleanup_interval` disables the background sweeper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Expiration applied by `Cache::set`
    pub default_expiration: Duration,
    /// Period between automatic sweeps of expired entries
    pub cleanup_interval: Duration,
}

impl Options {
    /// Creates options with no default expiration and no sweeper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expiration applied by `Cache::set`.
    pub fn default_expiration(mut self, duration: Duration) -> Self {
        self.default_expiration = duration;
        self
    }

    /// Sets the background sweep period.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Creates Options by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_EXPIRATION_MS` - Default expiration in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 60000)
    pub fn from_env() -> Self {
        Self {
            default_expiration: Duration::from_millis(env_millis(
                "CACHE_DEFAULT_EXPIRATION_MS",
                DEFAULT_EXPIRATION_MS,
            )),
            cleanup_interval: Duration::from_millis(env_millis(
                "CACHE_CLEANUP_INTERVAL_MS",
                DEFAULT_CLEANUP_INTERVAL_MS,
            )),
        }
    }
}

fn env_millis(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert_eq!(options.default_expiration, Duration::ZERO);
        assert_eq!(options.cleanup_interval, Duration::ZERO);
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new()
            .default_expiration(Duration::from_secs(5))
            .cleanup_interval(Duration::from_millis(250));
        assert_eq!(options.default_expiration, Duration::from_secs(5));
        assert_eq!(options.cleanup_interval, Duration::from_millis(250));
    }

    // Both env cases live in one test so they cannot race each other.
    #[test]
    fn test_options_from_env() {
        env::remove_var("CACHE_DEFAULT_EXPIRATION_MS");
        env::remove_var("CACHE_CLEANUP_INTERVAL_MS");

        let options = Options::from_env();
        assert_eq!(
            options.default_expiration,
            Duration::from_millis(DEFAULT_EXPIRATION_MS)
        );
        assert_eq!(
            options.cleanup_interval,
            Duration::from_millis(DEFAULT_CLEANUP_INTERVAL_MS)
        );

        env::set_var("CACHE_DEFAULT_EXPIRATION_MS", "1500");
        env::set_var("CACHE_CLEANUP_INTERVAL_MS", "not-a-number");

        let options = Options::from_env();
        assert_eq!(options.default_expiration, Duration::from_millis(1500));
        assert_eq!(
            options.cleanup_interval,
            Duration::from_millis(DEFAULT_CLEANUP_INTERVAL_MS)
        );

        env::remove_var("CACHE_DEFAULT_EXPIRATION_MS");
        env::remove_var("CACHE_CLEANUP_INTERVAL_MS");
    }
}
