// Stats layer - read-side aggregation over committed data

pub mod aggregator;

pub use aggregator::{Bucket, BucketMetric, GroupField, StatsService};
