// Services layer - domain workflows over the stores

pub mod review_service;

pub use review_service::ReviewService;
