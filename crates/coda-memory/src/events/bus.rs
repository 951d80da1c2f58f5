use super::types::{MemoryEvent, MemoryStoreEvent, OperationEntry};
use crate::config::DebugConfig;
use crate::stats::MemoryStats;
use crate::types::MemoryRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Fan-out of memory events to debug panels.
///
/// A panel that falls more than `debug.event_channel_capacity` events behind
/// gets `RecvError::Lagged` on its next receive; the manager never waits on
/// it. Events published while no panel is attached are counted, not queued.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<MemoryEvent>,
    unobserved: Arc<AtomicU64>,
}

impl EventBus {
    /// Bus holding `capacity` events per panel (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            unobserved: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Bus sized by `debug.event_channel_capacity`.
    #[must_use]
    pub fn from_config(debug: &DebugConfig) -> Self {
        Self::new(debug.event_channel_capacity)
    }

    /// Attach a panel. It sees only events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MemoryEvent> {
        self.sender.subscribe()
    }

    /// Send `event` to every attached panel and return how many got it.
    pub fn publish(&self, event: MemoryEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(delivered) => {
                trace!(event = name, delivered, "Memory event published");
                delivered
            }
            Err(_) => {
                self.unobserved.fetch_add(1, Ordering::Relaxed);
                0
            }
        }
    }

    /// Publish a `memory_store` event for a newly kept record.
    pub fn stored(&self, record: &MemoryRecord) -> usize {
        self.publish(MemoryEvent::MemoryStore(MemoryStoreEvent::from(record)))
    }

    /// Publish a logged operation.
    pub fn operation(&self, entry: OperationEntry) -> usize {
        self.publish(MemoryEvent::MemoryOperation(entry))
    }

    /// Publish a stats snapshot.
    pub fn stats(&self, stats: MemoryStats) -> usize {
        self.publish(MemoryEvent::MemoryStats(stats))
    }

    /// Panels currently attached.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published while no panel was attached.
    #[must_use]
    pub fn unobserved(&self) -> u64 {
        self.unobserved.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::from_config(&DebugConfig::default())
    }
}
