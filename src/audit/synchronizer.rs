use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::audit::queue::LogQueue;
use crate::errors::StorageError;
use crate::stores::AuditStore;
use crate::types::internal::audit::EventKind;

/// Drains the write-behind buffer into the persistence layer
///
/// One synchronization pass per kind may be in flight at a time: `sync`
/// serializes on a per-kind mutex, so concurrent callers cannot race on
/// peek/ack and double-count or drop entries. Entries are acked only after
/// the bulk insert succeeds; a failed pass leaves the whole batch queued
/// for the next run (at-least-once, deduplicated by event_id).
pub struct LogSynchronizer {
    queue: Arc<dyn LogQueue>,
    store: Arc<AuditStore>,
    login_pass: Mutex<()>,
    operation_pass: Mutex<()>,
}

impl LogSynchronizer {
    pub fn new(queue: Arc<dyn LogQueue>, store: Arc<AuditStore>) -> Self {
        Self {
            queue,
            store,
            login_pass: Mutex::new(()),
            operation_pass: Mutex::new(()),
        }
    }

    /// Drain up to `batch_size` entries of `kind` into durable storage
    ///
    /// Returns the number of entries removed from the queue. On a storage
    /// failure nothing is removed; the error is logged and returned to the
    /// operational caller — no producer is ever waiting on it.
    pub async fn sync(&self, kind: EventKind, batch_size: usize) -> Result<u64, StorageError> {
        let _pass = self.pass_lock(kind).lock().await;

        let batch = self.queue.peek(kind, batch_size).await?;
        if batch.is_empty() {
            return Ok(0);
        }

        match self.store.insert_batch(&batch).await {
            Ok(inserted) => {
                let ids: Vec<Uuid> = batch.iter().map(|entry| entry.event_id).collect();
                self.queue.ack(kind, &ids).await?;
                tracing::debug!(
                    kind = %kind,
                    drained = batch.len(),
                    inserted,
                    "audit synchronization pass complete"
                );
                Ok(batch.len() as u64)
            }
            Err(err) => {
                tracing::error!(
                    kind = %kind,
                    batch = batch.len(),
                    error = %err,
                    "audit synchronization insert failed, entries left queued"
                );
                Err(err)
            }
        }
    }

    fn pass_lock(&self, kind: EventKind) -> &Mutex<()> {
        match kind {
            EventKind::Login => &self.login_pass,
            EventKind::Operation => &self.operation_pass,
        }
    }
}
