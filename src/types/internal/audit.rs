use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which per-kind buffer queue an event belongs to
///
/// Ordering is FIFO within a kind; there is no cross-kind guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Login,
    Operation,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Operation => "operation",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutation recorded by an operation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A login event awaiting (or undergoing) durable persistence
///
/// `username`/`email` are denormalized at record time from the actor's
/// account; the audit read path never joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub actor_id: String,
    pub username: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

/// An operation event awaiting (or undergoing) durable persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    pub actor_id: String,
    pub username: String,
    pub email: String,
    pub operation: Operation,
    pub entity_id: String,
    pub entity_type: String,
    pub description: String,
    pub outcome: Outcome,
    pub created_at: DateTime<Utc>,
}

/// Union of the event shapes the buffer can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuditRecord {
    Login(LoginEvent),
    Operation(OperationEvent),
}

impl AuditRecord {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Login(_) => EventKind::Login,
            Self::Operation(_) => EventKind::Operation,
        }
    }
}

/// One queue entry: an audit record plus its idempotency key
///
/// `event_id` is generated at enqueue time and travels with the record
/// into the durable row, so a re-delivered entry can never insert twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferedEvent {
    pub event_id: Uuid,
    pub record: AuditRecord,
}

impl BufferedEvent {
    pub fn new(record: AuditRecord) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            record,
        }
    }
}
