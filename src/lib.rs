pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod report;
pub mod types;

pub use engines::allocation::{
    strategy_from_config, AllocationResult, AllocationStrategy, GeneticAllocator, GreedyAllocator,
};
pub use error::{AllocationError, Result};
pub use types::{Investment, Investor};
