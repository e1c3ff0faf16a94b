pub mod allocation;
pub mod generation;
pub mod metrics;
