mod common;

use std::sync::Arc;

use common::{new_submission, seed_account, setup};

use corpus_backend::audit::{AuditRecorder, LogQueue, LogSynchronizer};
use corpus_backend::errors::StorageError;
use corpus_backend::stores::AuditStore;
use corpus_backend::types::internal::audit::{
    BufferedEvent, EventKind, LoginEvent, Operation, Outcome,
};
use corpus_backend::types::internal::filter::{AuditFilter, Page, SortDirection, TimeRange};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::Database;
use uuid::Uuid;

fn login_event(actor: &str) -> LoginEvent {
    LoginEvent {
        actor_id: actor.to_string(),
        username: format!("user-{actor}"),
        email: format!("{actor}@example.com"),
        ip_address: "192.168.1.10".to_string(),
        user_agent: "integration-test".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn enqueue_then_sync_persists_events() {
    let h = setup().await;

    h.recorder.record_login(login_event("alice")).await.unwrap();
    h.recorder.record_login(login_event("bob")).await.unwrap();
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 2);

    // Nothing durable before the synchronizer runs
    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 0);

    let drained = h.synchronizer.sync(EventKind::Login, 100).await.unwrap();
    assert_eq!(drained, 2);
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 0);

    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 2);
    let alice = h
        .audit
        .list_login(
            &AuditFilter::default().actor("alice"),
            Page::default(),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].username, "user-alice");
    assert_eq!(alice[0].ip_address, "192.168.1.10");
}

#[tokio::test]
async fn sync_respects_batch_size() {
    let h = setup().await;
    let base = Utc::now();
    for i in 0..5 {
        let mut event = login_event(&format!("actor-{i}"));
        // Distinct timestamps keep the created_at sort deterministic
        event.created_at = base + Duration::milliseconds(i);
        h.recorder.record_login(event).await.unwrap();
    }

    let drained = h.synchronizer.sync(EventKind::Login, 2).await.unwrap();
    assert_eq!(drained, 2);
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 3);

    // Oldest entries drain first
    let stored = h
        .audit
        .list_login(&AuditFilter::default(), Page::default(), SortDirection::Asc)
        .await
        .unwrap();
    let actors: Vec<&str> = stored.iter().map(|e| e.actor_id.as_str()).collect();
    assert_eq!(actors, vec!["actor-0", "actor-1"]);
}

#[tokio::test]
async fn operation_events_flow_through_their_own_lane() {
    let h = setup().await;
    seed_account(&h.accounts, "owner-1").await;
    let id = h
        .service
        .submit("owner-1", new_submission("owner-1"))
        .await
        .unwrap();
    // Keep the two events' timestamps apart so the created_at sort below
    // is deterministic
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    h.service.approve("owner-1", &id).await.unwrap();

    assert_eq!(h.recorder.depth(EventKind::Operation).await.unwrap(), 2);
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 0);

    let drained = h.synchronizer.sync(EventKind::Operation, 100).await.unwrap();
    assert_eq!(drained, 2);

    let stored = h
        .audit
        .list_operation(&AuditFilter::default(), Page::default(), SortDirection::Asc)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].operation, Operation::Create.as_str());
    assert_eq!(stored[0].entity_id, id);
    assert_eq!(stored[0].entity_type, "submission");
    assert_eq!(stored[0].outcome, Outcome::Success.as_str());
    assert_eq!(stored[0].username, "user-owner-1");
    assert_eq!(stored[1].operation, Operation::Update.as_str());
}

#[tokio::test]
async fn sync_is_idempotent_under_redelivery() {
    let h = setup().await;

    let entry = {
        h.recorder.record_login(login_event("alice")).await.unwrap();
        h.queue.peek(EventKind::Login, 1).await.unwrap().remove(0)
    };

    let drained = h.synchronizer.sync(EventKind::Login, 100).await.unwrap();
    assert_eq!(drained, 1);

    // Simulate re-delivery of an already persisted entry (crash between
    // insert-ack and queue removal)
    h.queue.push(entry).await.unwrap();
    let drained = h.synchronizer.sync(EventKind::Login, 100).await.unwrap();
    assert_eq!(drained, 1);

    // The idempotency key deduplicated the second insert
    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn failed_sync_leaves_entries_queued_for_the_next_pass() {
    let h = setup().await;
    h.recorder.record_login(login_event("alice")).await.unwrap();
    h.recorder.record_login(login_event("bob")).await.unwrap();

    // A store over a database without the audit schema rejects the insert
    let broken_db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create broken database");
    let broken_store = Arc::new(AuditStore::new(broken_db));
    let broken_sync = LogSynchronizer::new(h.queue.clone(), broken_store);

    let err = broken_sync.sync(EventKind::Login, 100).await.unwrap_err();
    assert!(matches!(err, StorageError::Database { .. }));
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 2);

    // The healthy synchronizer drains the same entries afterwards
    let drained = h.synchronizer.sync(EventKind::Login, 100).await.unwrap();
    assert_eq!(drained, 2);
    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 2);
}

/// Queue backend that is always unreachable
struct DownQueue;

#[async_trait]
impl LogQueue for DownQueue {
    async fn push(&self, _entry: BufferedEvent) -> Result<(), StorageError> {
        Err(StorageError::queue("push", "backend unreachable"))
    }

    async fn peek(&self, _kind: EventKind, _max: usize) -> Result<Vec<BufferedEvent>, StorageError> {
        Err(StorageError::queue("peek", "backend unreachable"))
    }

    async fn ack(&self, _kind: EventKind, _event_ids: &[Uuid]) -> Result<(), StorageError> {
        Err(StorageError::queue("ack", "backend unreachable"))
    }

    async fn depth(&self, _kind: EventKind) -> Result<usize, StorageError> {
        Err(StorageError::queue("depth", "backend unreachable"))
    }
}

#[tokio::test]
async fn enqueue_degrades_to_direct_write_when_queue_is_down() {
    let h = setup().await;
    let recorder = AuditRecorder::new(Arc::new(DownQueue), h.audit.clone());

    recorder.record_login(login_event("alice")).await.unwrap();

    // The event went straight to durable storage instead of being dropped
    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn concurrent_sync_passes_do_not_double_deliver() {
    let h = setup().await;
    for i in 0..10 {
        h.recorder
            .record_login(login_event(&format!("actor-{i}")))
            .await
            .unwrap();
    }

    let sync = Arc::new(LogSynchronizer::new(h.queue.clone(), h.audit.clone()));
    let (a, b) = tokio::join!(
        {
            let sync = sync.clone();
            async move { sync.sync(EventKind::Login, 100).await }
        },
        {
            let sync = sync.clone();
            async move { sync.sync(EventKind::Login, 100).await }
        },
    );

    // The per-kind lock serializes the passes: together they drain the
    // queue exactly once
    assert_eq!(a.unwrap() + b.unwrap(), 10);
    assert_eq!(h.recorder.depth(EventKind::Login).await.unwrap(), 0);
    let count = h.audit.count_login(&AuditFilter::default()).await.unwrap();
    assert_eq!(count, 10);
}

#[tokio::test]
async fn purge_ranges_remove_old_events() {
    let h = setup().await;

    let mut old = login_event("alice");
    old.created_at = Utc::now() - Duration::days(100);
    h.recorder.record_login(old).await.unwrap();
    h.recorder.record_login(login_event("bob")).await.unwrap();
    h.synchronizer.sync(EventKind::Login, 100).await.unwrap();

    let cutoff = TimeRange::new(None, Some(Utc::now() - Duration::days(30)));
    let removed = h.audit.purge_login_range(cutoff).await.unwrap();
    assert_eq!(removed, 1);

    let remaining = h
        .audit
        .list_login(&AuditFilter::default(), Page::default(), SortDirection::Desc)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].actor_id, "bob");
}
