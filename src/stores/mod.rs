// Stores layer - Data access and repository pattern

pub mod account_store;
pub mod audit_store;
pub mod submission_store;

pub use account_store::AccountStore;
pub use audit_store::AuditStore;
pub use submission_store::{NewSubmission, SubmissionPatch, SubmissionStore};
