pub mod traits;
pub mod allocation;
pub mod data;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use allocation::{AllocationConfig, StrategyKind};
pub use data::DataConfig;
