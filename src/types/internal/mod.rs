pub mod audit;
pub mod filter;
pub mod status;
