//! Memory events - the observability stream consumed by debug dashboards.
//!
//! Three event kinds are published on a broadcast bus: a `memory_store`
//! event per long-term add, a `memory_operation` entry per mutating or
//! search call, and on-demand `memory_stats` snapshots. Operation entries
//! are also kept in a bounded log for late subscribers.

/// Broadcast bus for memory events.
pub mod bus;
/// Bounded operation log.
pub mod log;
/// Event and operation payload definitions.
pub mod types;

pub use bus::EventBus;
pub use log::OperationLog;
pub use types::{
    AddMemoryDetails, ApplyDecayDetails, EvictDetails, ForgetDetails, MemoryEvent,
    MemoryStoreEvent, Operation, OperationEntry, OperationType, ReinforceDetails,
    RetrieveDetails, UpdateImportanceDetails, UpdateMemoryDetails,
};
