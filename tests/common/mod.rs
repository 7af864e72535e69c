// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use migration::{AuditMigrator, CoreMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use corpus_backend::audit::{AuditRecorder, LogSynchronizer, MemoryLogQueue};
use corpus_backend::providers::{SystemClock, UuidProvider};
use corpus_backend::services::ReviewService;
use corpus_backend::stats::StatsService;
use corpus_backend::stores::{AccountStore, AuditStore, NewSubmission, SubmissionStore};
use corpus_backend::types::db::account;

/// Creates a test core database with migrations applied
pub async fn setup_core_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    CoreMigrator::up(&db, None)
        .await
        .expect("Failed to run core migrations");

    db
}

/// Creates a test audit database with migrations applied
pub async fn setup_audit_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&db, None)
        .await
        .expect("Failed to run audit migrations");

    db
}

/// Fully wired core: both databases, the in-memory queue, and every
/// component that hangs off them
pub struct TestHarness {
    pub core_db: DatabaseConnection,
    pub audit_db: DatabaseConnection,
    pub submissions: Arc<SubmissionStore>,
    pub accounts: Arc<AccountStore>,
    pub audit: Arc<AuditStore>,
    pub queue: Arc<MemoryLogQueue>,
    pub recorder: Arc<AuditRecorder>,
    pub synchronizer: LogSynchronizer,
    pub stats: StatsService,
    pub service: Arc<ReviewService>,
}

pub async fn setup() -> TestHarness {
    let core_db = setup_core_db().await;
    let audit_db = setup_audit_db().await;

    let submissions = Arc::new(SubmissionStore::new(core_db.clone()));
    let accounts = Arc::new(AccountStore::new(core_db.clone()));
    let audit = Arc::new(AuditStore::new(audit_db.clone()));
    let queue = Arc::new(MemoryLogQueue::new());
    let recorder = Arc::new(AuditRecorder::new(queue.clone(), audit.clone()));
    let synchronizer = LogSynchronizer::new(queue.clone(), audit.clone());
    let stats = StatsService::new(core_db.clone());
    let service = Arc::new(ReviewService::new(
        submissions.clone(),
        accounts.clone(),
        recorder.clone(),
        Arc::new(SystemClock),
        Arc::new(UuidProvider),
    ));

    TestHarness {
        core_db,
        audit_db,
        submissions,
        accounts,
        audit,
        queue,
        recorder,
        synchronizer,
        stats,
        service,
    }
}

/// Insert a test account usable as a submission owner / audit actor
pub async fn seed_account(accounts: &AccountStore, id: &str) -> account::Model {
    let model = account::Model {
        id: id.to_string(),
        username: format!("user-{id}"),
        email: format!("{id}@example.com"),
        created_at: chrono::Utc::now().timestamp_millis(),
    };
    accounts
        .insert(model.clone())
        .await
        .expect("Failed to seed account");
    model
}

/// A valid submission payload owned by `owner_id`
pub fn new_submission(owner_id: &str) -> NewSubmission {
    NewSubmission {
        owner_id: owner_id.to_string(),
        instruction: "Summarize the following text".to_string(),
        input: "A long passage about billing disputes".to_string(),
        output: "The passage describes a billing dispute".to_string(),
        theme: "billing".to_string(),
        source: "crowdsource".to_string(),
        note: "".to_string(),
    }
}
