//! Periodic eviction of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::ttl::TtlCache;

/// Handle to a running sweeper task.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

/// Spawn a task that calls [`TtlCache::sweep`] every `interval`.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_sweeper<V>(cache: Arc<TtlCache<V>>, interval: Duration) -> SweeperHandle
where
    V: Clone + Send + Sync + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let task = tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        // First tick completes immediately
        timer.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Cache sweeper shutting down");
                    break;
                }
                _ = timer.tick() => {
                    let evicted = cache.sweep();
                    if evicted > 0 {
                        debug!(evicted, remaining = cache.len(), "Swept expired cache entries");
                    }
                }
            }
        }
    });

    SweeperHandle { shutdown_tx, task }
}
