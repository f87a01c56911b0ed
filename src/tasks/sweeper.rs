//! Expiration Sweeper Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop or the cache it sweeps is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use tokio::runtime;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Something the sweeper can clean up periodically.
pub(crate) trait Sweep: Send + Sync + 'static {
    /// Removes all expired entries, returning how many were removed.
    fn sweep(&self) -> usize;
}

/// Lifecycle of a cache's background sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// No cleanup interval was configured, so no sweeper exists
    Disabled,
    /// The sweeper is active and will run on its next tick
    Running,
    /// `stop` has been called or the sweeper has exited; no further sweeps occur
    Stopped,
}

// == Sweeper ==
/// Owner-side handle of a background sweeper.
///
/// The sweep loop always runs on its own named thread driving a
/// single-threaded Tokio runtime it owns, so it never depends on the
/// caller's runtime (or lack of one).
pub(crate) struct Sweeper {
    interval: Duration,
    stop_tx: watch::Sender<bool>,
    finished: Arc<AtomicBool>,
}

impl Sweeper {
    /// Creates a sweeper that is not yet attached to a target.
    ///
    /// `interval` must be non-zero.
    pub(crate) fn new(interval: Duration) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            interval,
            stop_tx,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the sweep thread for `target`.
    pub(crate) fn start<S: Sweep>(&self, target: Weak<S>) {
        let interval = self.interval;
        let stop = self.stop_tx.subscribe();
        let finished = Arc::clone(&self.finished);

        let spawned = thread::Builder::new()
            .name("ttl-cache-sweeper".to_string())
            .spawn(move || {
                let _exit = ExitGuard(finished);
                match runtime::Builder::new_current_thread().enable_time().build() {
                    Ok(rt) => rt.block_on(run_sweeper(target, interval, stop)),
                    Err(err) => warn!("Cache sweeper runtime could not be built: {}", err),
                }
            });

        if let Err(err) = spawned {
            warn!("Cache sweeper thread could not be spawned: {}", err);
            self.finished.store(true, Ordering::SeqCst);
        }
    }

    /// Signals the sweep loop to terminate. Never blocks.
    pub(crate) fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Reports Running until `stop` is called or the sweep thread exits.
    pub(crate) fn state(&self) -> SweeperState {
        if *self.stop_tx.borrow() || self.finished.load(Ordering::SeqCst) {
            SweeperState::Stopped
        } else {
            SweeperState::Running
        }
    }
}

/// Marks the sweeper finished when its thread exits, panics included.
struct ExitGuard(Arc<AtomicBool>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Runs the sweep loop until stopped.
///
/// The loop exits when `stop` turns true, when its sender is dropped, or
/// when `target` can no longer be upgraded. The first sweep happens one full
/// `interval` after the loop starts.
pub(crate) async fn run_sweeper<S: Sweep>(
    target: Weak<S>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    info!(
        "Starting cache sweeper with interval of {} ms",
        interval.as_millis()
    );

    let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *stop.borrow_and_update() {
            break;
        }

        tokio::select! {
            biased;

            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let Some(target) = target.upgrade() else {
                    break;
                };
                let removed = target.sweep();

                if removed > 0 {
                    info!("Cache sweep: removed {} expired entries", removed);
                } else {
                    debug!("Cache sweep: no expired entries found");
                }
            }
        }
    }

    info!("Cache sweeper stopped");
}
