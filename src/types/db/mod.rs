// SeaORM entities; core database (submissions, accounts) and
// audit database (login_events, operation_events) are separate connections.

pub mod account;
pub mod login_event;
pub mod operation_event;
pub mod submission;
