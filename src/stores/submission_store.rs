use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::CoreError;
use crate::types::db::submission;
use crate::types::internal::filter::{Page, SortDirection, SubmissionFilter, TimeRange};
use crate::types::internal::status::StatusCode;

/// Fields required to create a submission
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub owner_id: String,
    pub instruction: String,
    pub input: String,
    pub output: String,
    pub theme: String,
    pub source: String,
    pub note: String,
}

/// Partial update of a submission's editable fields
///
/// Provided fields overwrite, omitted fields are untouched. Status is not
/// editable here; it only moves through [`SubmissionStore::transition`].
#[derive(Debug, Clone, Default)]
pub struct SubmissionPatch {
    pub owner_id: Option<String>,
    pub instruction: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub theme: Option<String>,
    pub source: Option<String>,
    pub note: Option<String>,
}

impl SubmissionPatch {
    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none()
            && self.instruction.is_none()
            && self.input.is_none()
            && self.output.is_none()
            && self.theme.is_none()
            && self.source.is_none()
            && self.note.is_none()
    }
}

/// Repository for the submissions collection
pub struct SubmissionStore {
    db: DatabaseConnection,
}

impl SubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a freshly created PENDING submission
    pub async fn insert(&self, model: submission::Model) -> Result<(), CoreError> {
        let active: submission::ActiveModel = model.into();
        submission::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("insert_submission", e))?;
        Ok(())
    }

    /// Fetch a single non-deleted submission
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matches or the row is soft-deleted.
    pub async fn get(&self, id: &str) -> Result<submission::Model, CoreError> {
        let found = submission::Entity::find()
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("get_submission", e))?;

        found.ok_or_else(|| CoreError::not_found("submission", id))
    }

    /// List submissions matching the filter, paginated, sorted on created_at
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        page: Page,
        sort: SortDirection,
    ) -> Result<Vec<submission::Model>, CoreError> {
        submission::Entity::find()
            .filter(Self::condition(filter))
            .order_by(submission::Column::CreatedAt, sort.into())
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list_submissions", e))
    }

    /// Count submissions matching the filter
    pub async fn count(&self, filter: &SubmissionFilter) -> Result<u64, CoreError> {
        submission::Entity::find()
            .filter(Self::condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database("count_submissions", e))
    }

    /// Atomic conditional status transition (find-and-modify discipline)
    ///
    /// A single UPDATE matches on id AND `deleted = false` AND the expected
    /// current status, so two concurrent decisions on the same submission
    /// cannot both succeed: exactly one affects a row, the other observes
    /// `Conflict`.
    pub async fn transition(
        &self,
        id: &str,
        expected: StatusCode,
        next: StatusCode,
        message: &str,
        now_ms: i64,
    ) -> Result<(), CoreError> {
        let result = submission::Entity::update_many()
            .col_expr(submission::Column::StatusCode, Expr::value(next.as_str()))
            .col_expr(submission::Column::StatusMessage, Expr::value(message))
            .col_expr(submission::Column::UpdatedAt, Expr::value(now_ms))
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::Deleted.eq(false))
            .filter(submission::Column::StatusCode.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("transition_submission", e))?;

        if result.rows_affected == 1 {
            return Ok(());
        }

        // Zero rows: either the submission is gone (or soft-deleted), or it
        // is no longer in the expected state. Re-read to tell the two apart.
        let current = self.get(id).await?;
        Err(CoreError::conflict(format!(
            "submission {} is {}, expected {}",
            id, current.status_code, expected
        )))
    }

    /// Partial update of editable fields; always bumps updated_at
    ///
    /// Works regardless of review status: reviewers may correct content
    /// before or after a decision.
    pub async fn apply_patch(
        &self,
        id: &str,
        patch: SubmissionPatch,
        now_ms: i64,
    ) -> Result<submission::Model, CoreError> {
        let current = self.get(id).await?;

        let mut active: submission::ActiveModel = current.into();
        if let Some(owner_id) = patch.owner_id {
            active.owner_id = Set(owner_id);
        }
        if let Some(instruction) = patch.instruction {
            active.instruction = Set(instruction);
        }
        if let Some(input) = patch.input {
            active.input = Set(input);
        }
        if let Some(output) = patch.output {
            active.output = Set(output);
        }
        if let Some(theme) = patch.theme {
            active.theme = Set(theme);
        }
        if let Some(source) = patch.source {
            active.source = Set(source);
        }
        if let Some(note) = patch.note {
            active.note = Set(note);
        }
        active.updated_at = Set(now_ms);

        active
            .update(&self.db)
            .await
            .map_err(|e| CoreError::database("update_submission", e))
    }

    /// Flag-delete a submission
    ///
    /// Not idempotent: a second call is `Conflict`, to surface double-delete
    /// bugs at the call site.
    pub async fn soft_delete(&self, id: &str, now_ms: i64) -> Result<(), CoreError> {
        let result = submission::Entity::update_many()
            .col_expr(submission::Column::Deleted, Expr::value(true))
            .col_expr(submission::Column::DeletedAt, Expr::value(Some(now_ms)))
            .col_expr(submission::Column::UpdatedAt, Expr::value(now_ms))
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::Deleted.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("soft_delete_submission", e))?;

        if result.rows_affected == 1 {
            return Ok(());
        }

        let exists = submission::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("soft_delete_submission", e))?
            .is_some();

        if exists {
            Err(CoreError::conflict(format!("submission {} already deleted", id)))
        } else {
            Err(CoreError::not_found("submission", id))
        }
    }

    /// Physically remove a submission, soft-deleted or not
    pub async fn hard_delete(&self, id: &str) -> Result<(), CoreError> {
        let result = submission::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("hard_delete_submission", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("submission", id));
        }
        Ok(())
    }

    /// Bulk hard-delete by created/updated time bounds; unset bounds are
    /// wildcards, so two unbounded ranges purge the whole collection
    pub async fn purge_range(
        &self,
        created: TimeRange,
        updated: TimeRange,
    ) -> Result<u64, CoreError> {
        let mut cond = Condition::all();
        cond = created.apply(submission::Column::CreatedAt, cond);
        cond = updated.apply(submission::Column::UpdatedAt, cond);

        let result = submission::Entity::delete_many()
            .filter(cond)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("purge_submissions", e))?;

        Ok(result.rows_affected)
    }

    /// Build the AND condition for a filter value object
    pub(crate) fn condition(filter: &SubmissionFilter) -> Condition {
        let mut cond = Condition::all();
        if !filter.include_deleted {
            cond = cond.add(submission::Column::Deleted.eq(false));
        }
        if let Some(owner_id) = &filter.owner_id {
            cond = cond.add(submission::Column::OwnerId.eq(owner_id.clone()));
        }
        if let Some(theme) = &filter.theme {
            cond = cond.add(submission::Column::Theme.eq(theme.clone()));
        }
        if let Some(status) = filter.status_code {
            cond = cond.add(submission::Column::StatusCode.eq(status.as_str()));
        }
        cond = filter.created.apply(submission::Column::CreatedAt, cond);
        cond = filter.updated.apply(submission::Column::UpdatedAt, cond);
        cond
    }
}
