//! Background retention task.

use crate::manager::MemoryManager;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Spawn maintenance at the configured `retention.maintenance_interval_secs`.
///
/// Returns `None` without spawning when the interval is 0.
pub fn spawn_maintenance_from_config(
    manager: Arc<MemoryManager>,
    cancel: CancellationToken,
) -> Option<JoinHandle<()>> {
    let Some(interval) = manager.maintenance_interval() else {
        info!("Memory maintenance disabled");
        return None;
    };
    Some(spawn_maintenance(manager, interval, cancel))
}

/// Run decay then eviction every `interval` until `cancel` fires.
///
/// Each pass takes the long-term write lock, so it never overlaps an
/// in-flight add.
pub fn spawn_maintenance(
    manager: Arc<MemoryManager>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Memory maintenance task started");
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let report = manager.apply_decay(Utc::now()).await;
                    let evicted = manager.evict_to_capacity().await;
                    debug!(
                        decayed = report.decayed,
                        forgotten = report.forgotten.len(),
                        evicted = evicted.len(),
                        "Memory maintenance pass complete"
                    );
                }
                _ = cancel.cancelled() => {
                    info!("Memory maintenance task shutting down");
                    break;
                }
            }
        }
    })
}
