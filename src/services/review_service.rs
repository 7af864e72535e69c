use std::sync::Arc;

use crate::audit::AuditRecorder;
use crate::errors::CoreError;
use crate::providers::{Clock, IdProvider};
use crate::stores::{AccountStore, NewSubmission, SubmissionPatch, SubmissionStore};
use crate::types::db::submission;
use crate::types::internal::audit::{Operation, Outcome};
use crate::types::internal::filter::{Page, SortDirection, SubmissionFilter, TimeRange};
use crate::types::internal::status::StatusCode;

/// The submission review state machine
///
/// Legal transitions: PENDING → APPROVED, PENDING → REJECTED (message
/// required); either terminal state may be soft-deleted (orthogonal flag),
/// and soft-deleted rows may be hard-deleted. No-op transitions are
/// rejected with `Conflict` rather than silently accepted, so
/// double-approval races surface at the call site.
///
/// Every mutation persists first, then fires an operation audit event into
/// the write-behind buffer; audit failures are logged and never fail the
/// already-committed mutation.
pub struct ReviewService {
    submissions: Arc<SubmissionStore>,
    accounts: Arc<AccountStore>,
    recorder: Arc<AuditRecorder>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdProvider>,
}

impl ReviewService {
    pub fn new(
        submissions: Arc<SubmissionStore>,
        accounts: Arc<AccountStore>,
        recorder: Arc<AuditRecorder>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            submissions,
            accounts,
            recorder,
            clock,
            ids,
        }
    }

    /// Create a new PENDING submission and return its id
    ///
    /// # Errors
    ///
    /// Returns `Validation` when any of the payload fields (instruction,
    /// input, output) is empty.
    pub async fn submit(&self, actor_id: &str, new: NewSubmission) -> Result<String, CoreError> {
        if new.instruction.trim().is_empty() {
            return Err(CoreError::validation("instruction must not be empty"));
        }
        if new.input.trim().is_empty() {
            return Err(CoreError::validation("input must not be empty"));
        }
        if new.output.trim().is_empty() {
            return Err(CoreError::validation("output must not be empty"));
        }

        let id = self.ids.next_id();
        let now_ms = self.clock.now().timestamp_millis();
        self.submissions
            .insert(submission::Model {
                id: id.clone(),
                owner_id: new.owner_id,
                instruction: new.instruction,
                input: new.input,
                output: new.output,
                theme: new.theme,
                source: new.source,
                note: new.note,
                status_code: StatusCode::Pending.as_str().to_string(),
                status_message: String::new(),
                deleted: false,
                deleted_at: None,
                created_at: now_ms,
                updated_at: now_ms,
            })
            .await?;

        self.fire_operation(actor_id, Operation::Create, &id, "submitted for review")
            .await;
        Ok(id)
    }

    /// PENDING → APPROVED
    ///
    /// # Errors
    ///
    /// `NotFound` when no non-deleted submission has this id; `Conflict`
    /// when the submission is no longer PENDING (exactly one of two
    /// concurrent decisions wins).
    pub async fn approve(&self, actor_id: &str, id: &str) -> Result<(), CoreError> {
        let now_ms = self.clock.now().timestamp_millis();
        self.submissions
            .transition(id, StatusCode::Pending, StatusCode::Approved, "", now_ms)
            .await?;

        self.fire_operation(actor_id, Operation::Update, id, "approved submission")
            .await;
        Ok(())
    }

    /// PENDING → REJECTED with a mandatory reviewer message
    pub async fn reject(&self, actor_id: &str, id: &str, message: &str) -> Result<(), CoreError> {
        if message.trim().is_empty() {
            return Err(CoreError::validation("rejection message must not be empty"));
        }

        let now_ms = self.clock.now().timestamp_millis();
        self.submissions
            .transition(id, StatusCode::Pending, StatusCode::Rejected, message, now_ms)
            .await?;

        self.fire_operation(actor_id, Operation::Update, id, "rejected submission")
            .await;
        Ok(())
    }

    /// Partial content correction, allowed before or after a decision
    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        patch: SubmissionPatch,
    ) -> Result<submission::Model, CoreError> {
        let now_ms = self.clock.now().timestamp_millis();
        let updated = self.submissions.apply_patch(id, patch, now_ms).await?;

        self.fire_operation(actor_id, Operation::Update, id, "edited submission")
            .await;
        Ok(updated)
    }

    /// Flag-delete; a second call is `Conflict`
    pub async fn soft_delete(&self, actor_id: &str, id: &str) -> Result<(), CoreError> {
        let now_ms = self.clock.now().timestamp_millis();
        self.submissions.soft_delete(id, now_ms).await?;

        self.fire_operation(actor_id, Operation::Delete, id, "soft-deleted submission")
            .await;
        Ok(())
    }

    /// Physical removal, allowed whether or not soft-deleted (admin override)
    pub async fn hard_delete(&self, actor_id: &str, id: &str) -> Result<(), CoreError> {
        self.submissions.hard_delete(id).await?;

        self.fire_operation(actor_id, Operation::Delete, id, "hard-deleted submission")
            .await;
        Ok(())
    }

    /// Bulk hard-delete by time bounds; returns the number removed
    pub async fn purge_range(
        &self,
        actor_id: &str,
        created: TimeRange,
        updated: TimeRange,
    ) -> Result<u64, CoreError> {
        let removed = self.submissions.purge_range(created, updated).await?;

        self.fire_operation(
            actor_id,
            Operation::Delete,
            "*",
            format!("purged {removed} submissions by time range"),
        )
        .await;
        Ok(removed)
    }

    /// Read a single non-deleted submission
    pub async fn get(&self, id: &str) -> Result<submission::Model, CoreError> {
        self.submissions.get(id).await
    }

    /// List non-deleted submissions (unless the filter opts into deleted)
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        page: Page,
        sort: SortDirection,
    ) -> Result<Vec<submission::Model>, CoreError> {
        self.submissions.list(filter, page, sort).await
    }

    /// Enqueue an operation audit event for a committed mutation
    ///
    /// The actor's display fields are denormalized from the account store;
    /// the reference is weak, so a missing account degrades to empty fields
    /// instead of failing the mutation.
    async fn fire_operation(
        &self,
        actor_id: &str,
        operation: Operation,
        entity_id: &str,
        description: impl Into<String>,
    ) {
        let (username, email) = match self.accounts.get(actor_id).await {
            Ok(account) => (account.username, account.email),
            Err(err) => {
                tracing::debug!(actor_id, error = %err, "actor lookup failed for audit event");
                (String::new(), String::new())
            }
        };

        let result = self
            .recorder
            .operation(operation, entity_id)
            .actor(actor_id, username, email)
            .description(description)
            .outcome(Outcome::Success)
            .at(self.clock.now())
            .record()
            .await;

        if let Err(err) = result {
            tracing::error!(
                entity_id,
                operation = %operation,
                error = %err,
                "failed to record operation audit event"
            );
        }
    }
}
