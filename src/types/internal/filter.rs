use chrono::{DateTime, Utc};
use sea_orm::sea_query::Condition;
use sea_orm::{ColumnTrait, Order};

use crate::types::internal::status::StatusCode;

/// Optional half-open time window: `from` inclusive, `to` exclusive
///
/// Unset bounds are wildcards, so the default value matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Add this range's bounds on a unix-millis column to a condition
    pub fn apply<C: ColumnTrait>(&self, column: C, mut cond: Condition) -> Condition {
        if let Some(from) = self.from {
            cond = cond.add(column.gte(from.timestamp_millis()));
        }
        if let Some(to) = self.to {
            cond = cond.add(column.lt(to.timestamp_millis()));
        }
        cond
    }
}

/// Query value object for submissions: every field optional, AND semantics
///
/// Replaces the one-method-per-filter-combination repository surface with a
/// single parameterized query. Soft-deleted rows are excluded unless
/// `include_deleted` is set by an explicitly named admin read path.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub owner_id: Option<String>,
    pub theme: Option<String>,
    pub status_code: Option<StatusCode>,
    pub created: TimeRange,
    pub updated: TimeRange,
    pub include_deleted: bool,
}

impl SubmissionFilter {
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn created(mut self, range: TimeRange) -> Self {
        self.created = range;
        self
    }

    pub fn updated(mut self, range: TimeRange) -> Self {
        self.updated = range;
        self
    }

    /// Admin view: include soft-deleted rows
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }
}

/// Query value object for audit event reads
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub actor_id: Option<String>,
    pub created: TimeRange,
}

impl AuditFilter {
    pub fn actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn created(mut self, range: TimeRange) -> Self {
        self.created = range;
        self
    }
}

/// Offset/limit pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: 50 }
    }
}

/// Sort direction on creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl From<SortDirection> for Order {
    fn from(dir: SortDirection) -> Order {
        match dir {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}
