// Providers layer - injectable collaborators (time, ids)

pub mod clock;
pub mod id;

pub use clock::{Clock, SystemClock};
pub use id::{IdProvider, UuidProvider};
