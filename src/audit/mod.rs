// Audit layer - write-behind buffering and synchronization of audit events

pub mod queue;
pub mod recorder;
pub mod synchronizer;

pub use queue::{LogQueue, MemoryLogQueue};
pub use recorder::{AuditRecorder, OperationEventBuilder};
pub use synchronizer::LogSynchronizer;
