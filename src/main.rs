//! TTL Cache demo
//!
//! Walks through the cache API: plain and timed sets, expiry, lazy
//! computation, deletion, snapshots and flushing.

use std::fmt::Display;
use std::thread::sleep;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Cache, CacheError, Options};

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = Options::from_env();
    info!(
        "Configuration loaded: default_expiration={:?}, cleanup_interval={:?}",
        options.default_expiration, options.cleanup_interval
    );

    let cache: Cache<String> = Cache::new(options);

    cache.set("string", "hello world".to_string())?;
    cache.set("number", 42.to_string())?;
    cache.set("bool", true.to_string())?;
    cache.set_with_expiration(
        "short-lived",
        "I'll expire soon".to_string(),
        Duration::from_secs(2),
    )?;

    print_value(&cache, "string");
    print_value(&cache, "number");
    print_value(&cache, "bool");
    print_value(&cache, "short-lived");
    print_value(&cache, "non-existent");

    println!("\nWaiting for the short-lived value to expire...");
    sleep(Duration::from_secs(3));

    print_value(&cache, "short-lived");
    print_value(&cache, "string");

    cache.get_or_set("computed", || {
        println!("Computing value...");
        sleep(Duration::from_millis(100));
        Ok::<_, CacheError>("computed value".to_string())
    })?;
    print_value(&cache, "computed");

    // Already cached, so this closure never runs
    cache.get_or_set("computed", || {
        println!("Computing value again... (this shouldn't be displayed)");
        Ok::<_, CacheError>("new computed value".to_string())
    })?;
    print_value(&cache, "computed");

    println!("\nDeleting 'string' from cache");
    cache.delete("string");
    print_value(&cache, "string");

    println!("\nAll items in cache:");
    let mut items: Vec<_> = cache.items().into_iter().collect();
    items.sort();
    for (key, value) in items {
        println!("{}: {}", key, value);
    }

    println!("\nFlushing cache...");
    cache.flush();
    println!("Items in cache after flush: {}", cache.item_count());

    cache.stop();
    Ok(())
}

fn print_value<V: Clone + Display + Send + Sync + 'static>(cache: &Cache<V>, key: &str) {
    match cache.get(key) {
        Ok(value) => println!("Key '{}': {}", key, value),
        Err(err) => println!("Key '{}': {}", key, err),
    }
}
