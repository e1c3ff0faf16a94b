use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocationError {
    /// Input collections are missing or malformed. Fatal, no result is produced.
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    #[error("Unsupported chromosome variant: {0}")]
    UnsupportedVariant(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AllocationError>;
