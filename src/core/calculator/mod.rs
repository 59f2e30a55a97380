pub mod metrics;
pub mod monthly;
