use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::audit::queue::LogQueue;
use crate::errors::StorageError;
use crate::stores::AuditStore;
use crate::types::internal::audit::{
    AuditRecord, BufferedEvent, EventKind, LoginEvent, Operation, OperationEvent, Outcome,
};

/// Producer facade for the write-behind audit pipeline
///
/// `record_*` enqueues and returns; the caller never waits for a database
/// write on the happy path. If the queue backend itself is unreachable the
/// recorder degrades to a direct synchronous insert through the audit store
/// rather than dropping the event.
pub struct AuditRecorder {
    queue: Arc<dyn LogQueue>,
    fallback: Arc<AuditStore>,
}

impl AuditRecorder {
    pub fn new(queue: Arc<dyn LogQueue>, fallback: Arc<AuditStore>) -> Self {
        Self { queue, fallback }
    }

    /// Record a login event (fire-and-forget relative to durable storage)
    pub async fn record_login(&self, event: LoginEvent) -> Result<(), StorageError> {
        self.record(AuditRecord::Login(event)).await
    }

    /// Record an operation event (fire-and-forget relative to durable storage)
    pub async fn record_operation(&self, event: OperationEvent) -> Result<(), StorageError> {
        self.record(AuditRecord::Operation(event)).await
    }

    /// Fluent construction of an operation event
    pub fn operation(&self, operation: Operation, entity_id: impl Into<String>) -> OperationEventBuilder<'_> {
        OperationEventBuilder::new(self, operation, entity_id.into())
    }

    /// Queue depth for a kind; the operational backpressure signal
    pub async fn depth(&self, kind: EventKind) -> Result<usize, StorageError> {
        self.queue.depth(kind).await
    }

    async fn record(&self, record: AuditRecord) -> Result<(), StorageError> {
        let entry = BufferedEvent::new(record);
        match self.queue.push(entry.clone()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    kind = %entry.record.kind(),
                    error = %err,
                    "audit queue unavailable, falling back to direct write"
                );
                self.fallback.insert_one(&entry).await
            }
        }
    }
}

/// Fluent builder for operation audit events
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use corpus_backend::audit::AuditRecorder;
/// # use corpus_backend::types::internal::audit::{Operation, Outcome};
/// # async fn example(recorder: Arc<AuditRecorder>) {
/// recorder
///     .operation(Operation::Update, "submission-id")
///     .actor("reviewer-id", "reviewer", "reviewer@example.com")
///     .description("approved submission")
///     .outcome(Outcome::Success)
///     .record()
///     .await
///     .expect("failed to record audit event");
/// # }
/// ```
pub struct OperationEventBuilder<'a> {
    recorder: &'a AuditRecorder,
    event: OperationEvent,
    created_at: Option<DateTime<Utc>>,
}

impl<'a> OperationEventBuilder<'a> {
    fn new(recorder: &'a AuditRecorder, operation: Operation, entity_id: String) -> Self {
        Self {
            recorder,
            event: OperationEvent {
                actor_id: String::new(),
                username: String::new(),
                email: String::new(),
                operation,
                entity_id,
                entity_type: "submission".to_string(),
                description: String::new(),
                outcome: Outcome::Success,
                created_at: Utc::now(),
            },
            created_at: None,
        }
    }

    /// Set the acting account with its denormalized display fields
    pub fn actor(
        mut self,
        actor_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.event.actor_id = actor_id.into();
        self.event.username = username.into();
        self.event.email = email.into();
        self
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.event.entity_type = entity_type.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.event.description = description.into();
        self
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.event.outcome = outcome;
        self
    }

    /// Pin the event timestamp (defaults to wall-clock time at build)
    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.created_at = Some(when);
        self
    }

    pub async fn record(mut self) -> Result<(), StorageError> {
        if let Some(when) = self.created_at {
            self.event.created_at = when;
        }
        self.recorder.record_operation(self.event).await
    }
}
