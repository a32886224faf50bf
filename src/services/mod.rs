//! Services for record decoration and pivot aggregation

pub mod aggregator;
pub mod decomposer;

pub use aggregator::Aggregator;
