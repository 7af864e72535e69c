// Library exports for integration tests and the service/API layer

pub mod audit;
pub mod errors;
pub mod providers;
pub mod services;
pub mod stats;
pub mod stores;
pub mod types;
