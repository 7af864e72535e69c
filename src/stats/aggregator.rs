use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::errors::CoreError;
use crate::stores::SubmissionStore;
use crate::types::db::{account, submission};
use crate::types::internal::filter::{SubmissionFilter, TimeRange};

/// Which collection a time-bucketed series counts over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMetric {
    SubmissionsCreated,
    AccountsCreated,
}

/// Group-by dimension for submission counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Theme,
    StatusCode,
}

/// One interval of a time-bucketed series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub bucket_start: DateTime<Utc>,
    pub count: u64,
}

#[derive(FromQueryResult)]
struct CreatedAtRow {
    created_at: i64,
}

#[derive(FromQueryResult)]
struct GroupCountRow {
    key: String,
    count: i64,
}

/// Read-only aggregation over the core database
///
/// Never consults the write-behind buffer: results answer "what has been
/// durably persisted". Soft-deleted submissions are excluded throughout.
pub struct StatsService {
    db: DatabaseConnection,
}

impl StatsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count submissions matching an AND of the filter's optional fields
    pub async fn count_submissions(&self, filter: &SubmissionFilter) -> Result<u64, CoreError> {
        submission::Entity::find()
            .filter(SubmissionStore::condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database("count_submissions", e))
    }

    /// Time-bucketed creation counts over `[start, end)`
    ///
    /// Produces exactly `ceil((end - start) / bucket_size)` buckets,
    /// zero-filled, with no gaps — dashboards chart the sequence directly.
    pub async fn bucketed_count(
        &self,
        metric: BucketMetric,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        bucket_size: Duration,
    ) -> Result<Vec<Bucket>, CoreError> {
        let bucket_ms = bucket_size.num_milliseconds();
        if bucket_ms <= 0 {
            return Err(CoreError::validation("bucket_size must be positive"));
        }
        if end <= start {
            return Err(CoreError::validation("end must be after start"));
        }

        let start_ms = start.timestamp_millis();
        let end_ms = end.timestamp_millis();
        let range = TimeRange::new(Some(start), Some(end));

        let rows: Vec<CreatedAtRow> = match metric {
            BucketMetric::SubmissionsCreated => {
                let filter = SubmissionFilter::default().created(range);
                submission::Entity::find()
                    .select_only()
                    .column(submission::Column::CreatedAt)
                    .filter(SubmissionStore::condition(&filter))
                    .into_model()
                    .all(&self.db)
                    .await
                    .map_err(|e| CoreError::database("bucketed_count_submissions", e))?
            }
            BucketMetric::AccountsCreated => {
                let cond = range.apply(account::Column::CreatedAt, sea_orm::Condition::all());
                account::Entity::find()
                    .select_only()
                    .column(account::Column::CreatedAt)
                    .filter(cond)
                    .into_model()
                    .all(&self.db)
                    .await
                    .map_err(|e| CoreError::database("bucketed_count_accounts", e))?
            }
        };

        let bucket_count = ((end_ms - start_ms) + bucket_ms - 1) / bucket_ms;
        let mut counts = vec![0u64; bucket_count as usize];
        for row in rows {
            // created_at ∈ [start_ms, end_ms) by the query filter, so the
            // index is always in range
            let index = ((row.created_at - start_ms) / bucket_ms) as usize;
            counts[index] += 1;
        }

        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bucket {
                bucket_start: start + Duration::milliseconds(bucket_ms * i as i64),
                count,
            })
            .collect())
    }

    /// Count submissions per distinct value of `field`
    ///
    /// Only observed values appear; a value with zero matches has no entry.
    pub async fn group_by_count(
        &self,
        field: GroupField,
        filter: &SubmissionFilter,
    ) -> Result<HashMap<String, u64>, CoreError> {
        let column = match field {
            GroupField::Theme => submission::Column::Theme,
            GroupField::StatusCode => submission::Column::StatusCode,
        };

        let rows: Vec<GroupCountRow> = submission::Entity::find()
            .select_only()
            .column_as(column, "key")
            .column_as(submission::Column::Id.count(), "count")
            .filter(SubmissionStore::condition(filter))
            .group_by(column)
            .into_model()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("group_by_count", e))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.key, row.count as u64))
            .collect())
    }
}
