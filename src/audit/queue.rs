use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::types::internal::audit::{BufferedEvent, EventKind};

/// Write-behind buffer backend: an ordered queue per event kind
///
/// Producers `push` without waiting for durable storage; the synchronizer
/// is the single logical consumer per kind and drains with
/// peek-then-confirm: entries leave the queue only after `ack`, so a crash
/// between dequeue and insert leaves them re-deliverable (at-least-once).
/// There is no size-based eviction; `depth` is the backpressure observable.
#[async_trait]
pub trait LogQueue: Send + Sync {
    /// Append to the tail of the kind-specific queue
    async fn push(&self, entry: BufferedEvent) -> Result<(), StorageError>;

    /// Read up to `max` entries from the head without removing them
    async fn peek(&self, kind: EventKind, max: usize) -> Result<Vec<BufferedEvent>, StorageError>;

    /// Remove exactly the entries with the given ids after a successful
    /// durable insert
    async fn ack(&self, kind: EventKind, event_ids: &[Uuid]) -> Result<(), StorageError>;

    /// Current queue depth for the kind
    async fn depth(&self, kind: EventKind) -> Result<usize, StorageError>;
}

/// In-process queue backend
///
/// One FIFO lane per kind behind its own mutex; locks are held only for the
/// duration of the queue operation, never across database I/O.
#[derive(Default)]
pub struct MemoryLogQueue {
    login: Mutex<VecDeque<BufferedEvent>>,
    operation: Mutex<VecDeque<BufferedEvent>>,
}

impl MemoryLogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lane(&self, kind: EventKind) -> &Mutex<VecDeque<BufferedEvent>> {
        match kind {
            EventKind::Login => &self.login,
            EventKind::Operation => &self.operation,
        }
    }
}

#[async_trait]
impl LogQueue for MemoryLogQueue {
    async fn push(&self, entry: BufferedEvent) -> Result<(), StorageError> {
        let mut lane = self.lane(entry.record.kind()).lock().await;
        lane.push_back(entry);
        Ok(())
    }

    async fn peek(&self, kind: EventKind, max: usize) -> Result<Vec<BufferedEvent>, StorageError> {
        let lane = self.lane(kind).lock().await;
        Ok(lane.iter().take(max).cloned().collect())
    }

    async fn ack(&self, kind: EventKind, event_ids: &[Uuid]) -> Result<(), StorageError> {
        let mut lane = self.lane(kind).lock().await;
        lane.retain(|entry| !event_ids.contains(&entry.event_id));
        Ok(())
    }

    async fn depth(&self, kind: EventKind) -> Result<usize, StorageError> {
        let lane = self.lane(kind).lock().await;
        Ok(lane.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::audit::{AuditRecord, LoginEvent, Operation, OperationEvent, Outcome};
    use chrono::Utc;

    fn login_entry(actor: &str) -> BufferedEvent {
        BufferedEvent::new(AuditRecord::Login(LoginEvent {
            actor_id: actor.to_string(),
            username: actor.to_string(),
            email: format!("{actor}@example.com"),
            ip_address: "10.0.0.1".to_string(),
            user_agent: "test".to_string(),
            created_at: Utc::now(),
        }))
    }

    fn operation_entry(entity: &str) -> BufferedEvent {
        BufferedEvent::new(AuditRecord::Operation(OperationEvent {
            actor_id: "reviewer".to_string(),
            username: "reviewer".to_string(),
            email: "reviewer@example.com".to_string(),
            operation: Operation::Create,
            entity_id: entity.to_string(),
            entity_type: "submission".to_string(),
            description: "created".to_string(),
            outcome: Outcome::Success,
            created_at: Utc::now(),
        }))
    }

    #[tokio::test]
    async fn peek_preserves_fifo_order_within_a_kind() {
        let queue = MemoryLogQueue::new();
        let first = login_entry("alice");
        let second = login_entry("bob");
        queue.push(first.clone()).await.unwrap();
        queue.push(second.clone()).await.unwrap();

        let peeked = queue.peek(EventKind::Login, 10).await.unwrap();
        assert_eq!(peeked.len(), 2);
        assert_eq!(peeked[0].event_id, first.event_id);
        assert_eq!(peeked[1].event_id, second.event_id);
    }

    #[tokio::test]
    async fn peek_does_not_remove_entries() {
        let queue = MemoryLogQueue::new();
        queue.push(login_entry("alice")).await.unwrap();

        queue.peek(EventKind::Login, 10).await.unwrap();
        assert_eq!(queue.depth(EventKind::Login).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ack_removes_only_the_given_ids() {
        let queue = MemoryLogQueue::new();
        let first = login_entry("alice");
        let second = login_entry("bob");
        queue.push(first.clone()).await.unwrap();
        queue.push(second.clone()).await.unwrap();

        queue.ack(EventKind::Login, &[first.event_id]).await.unwrap();

        let remaining = queue.peek(EventKind::Login, 10).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].event_id, second.event_id);
    }

    #[tokio::test]
    async fn kinds_use_independent_lanes() {
        let queue = MemoryLogQueue::new();
        queue.push(login_entry("alice")).await.unwrap();
        queue.push(operation_entry("sub-1")).await.unwrap();

        assert_eq!(queue.depth(EventKind::Login).await.unwrap(), 1);
        assert_eq!(queue.depth(EventKind::Operation).await.unwrap(), 1);

        queue.ack(EventKind::Login, &[]).await.unwrap();
        assert_eq!(queue.depth(EventKind::Login).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn peek_respects_batch_size() {
        let queue = MemoryLogQueue::new();
        for i in 0..5 {
            queue.push(operation_entry(&format!("sub-{i}"))).await.unwrap();
        }

        let peeked = queue.peek(EventKind::Operation, 3).await.unwrap();
        assert_eq!(peeked.len(), 3);
        assert_eq!(queue.depth(EventKind::Operation).await.unwrap(), 5);
    }
}
