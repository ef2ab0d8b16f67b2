//! The sync loop: keeps the mapping store synchronized with the tracked
//! resource for the process lifetime.
//!
//! # States
//! - Disconnected: about to attempt a watch-open
//! - Watching: consuming the event stream in order
//! - Stopped: shutdown observed; the loop does not restart
//!
//! # State Transitions
//! ```text
//! Disconnected → Watching: watch opened (health gauge set to success)
//! Watching → Disconnected: stream closed (normal watch expiry)
//! Disconnected → Stopped: shutdown signal seen before the open attempt
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::mapstore::parser::parse_map_data;
use crate::mapstore::MapStore;
use crate::observability::metrics;
use crate::resilience::backoff::reconnect_delay;
use crate::sync::source::{WatchEvent, WatchOpenError, WatchSource};
use crate::sync::RESOURCE_NAME;

/// Reconnect tuning for the sync loop.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base delay before the first reopen retry.
    pub reconnect_base_ms: u64,
    /// Cap on the exponential reopen delay.
    pub reconnect_max_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reconnect_base_ms: 200,
            reconnect_max_ms: 30_000,
        }
    }
}

/// Fatal synchronization failures, surfaced to the owning supervisor.
///
/// A store that can never synchronize must not silently serve an empty view
/// as if it were authoritative, so this is not retried.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("unable to establish initial watch on {RESOURCE_NAME}: {0}")]
    InitialWatch(#[source] WatchOpenError),
}

/// Drives a [`WatchSource`] and commits the results into the [`MapStore`].
pub struct SyncEngine<S> {
    source: S,
    store: Arc<MapStore>,
    config: SyncConfig,
}

impl<S: WatchSource> SyncEngine<S> {
    pub fn new(source: S, store: Arc<MapStore>, config: SyncConfig) -> Self {
        Self { source, store, config }
    }

    /// Run until shutdown or a fatal error.
    ///
    /// The shutdown receiver is checked before each watch-open attempt;
    /// in-flight stream consumption is not interrupted, so a trigger takes
    /// effect at the next stream closure.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Result<(), SyncError> {
        let mut established = false;
        let mut failed_attempts: u32 = 0;

        loop {
            match shutdown.try_recv() {
                Err(TryRecvError::Empty) => {}
                // A value, a lagged slot, or a closed channel all mean a
                // trigger happened.
                _ => {
                    tracing::info!("shutdown observed, sync loop stopping");
                    return Ok(());
                }
            }

            let mut stream = match self.source.open(RESOURCE_NAME).await {
                Ok(stream) => stream,
                Err(err) => {
                    metrics::record_watch_health(false);
                    if !established {
                        return Err(SyncError::InitialWatch(err));
                    }
                    failed_attempts += 1;
                    let delay = reconnect_delay(
                        failed_attempts,
                        self.config.reconnect_base_ms,
                        self.config.reconnect_max_ms,
                    );
                    tracing::error!(
                        error = %err,
                        attempt = failed_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "unable to re-establish watch, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            metrics::record_watch_health(true);
            established = true;
            failed_attempts = 0;
            tracing::info!(resource = RESOURCE_NAME, "watch established");

            while let Some(event) = stream.recv().await {
                self.apply(event);
            }
            tracing::warn!(resource = RESOURCE_NAME, "watch stream closed, reconnecting");
        }
    }

    fn apply(&self, event: WatchEvent) {
        match event {
            WatchEvent::Error(message) => {
                tracing::error!(error = %message, "received a watch error");
            }
            WatchEvent::Deleted => {
                tracing::info!("resource deleted, resetting mapping store");
                self.store.replace(Vec::new(), Vec::new(), Vec::new());
            }
            WatchEvent::Added(resource) | WatchEvent::Modified(resource) => {
                if resource.name != RESOURCE_NAME {
                    return;
                }
                tracing::info!(resource = %resource.name, "received mapping update");
                let (parsed, parse_err) = parse_map_data(&resource.data);
                if let Some(err) = parse_err {
                    tracing::error!(
                        error = %err,
                        "mapping document partially malformed, applying the fields that parsed"
                    );
                }
                self.store
                    .replace(parsed.users, parsed.roles, parsed.accounts);
            }
        }
    }
}
