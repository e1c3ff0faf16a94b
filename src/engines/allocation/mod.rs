pub mod context;
pub mod genetic;
pub mod greedy;
pub mod strategy;

pub use context::{AllocationContext, UNASSIGNED};
pub use genetic::GeneticAllocator;
pub use greedy::GreedyAllocator;
pub use strategy::{strategy_from_config, validate_inputs, Allocation, AllocationResult, AllocationStrategy};
