use super::{allocation::AllocationConfig, data::DataConfig, traits::ConfigSection};
use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment overrides look like `FUNDSPLIT_ALLOCATION__STRATEGY=genetic`.
pub const ENV_PREFIX: &str = "FUNDSPLIT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub allocation: AllocationConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AllocationError> {
        self.allocation.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Loads a TOML or JSON file (by extension) with `FUNDSPLIT_*` environment overrides on top.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AllocationError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;
        self.apply(settings)
    }

    /// Defaults plus environment overrides, for running without a config file.
    pub fn load_from_env(&self) -> Result<(), AllocationError> {
        let settings = ::config::Config::builder()
            .add_source(Self::environment())
            .build()?;
        self.apply(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AllocationError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| AllocationError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| AllocationError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), AllocationError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = candidate;
        Ok(())
    }

    fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn apply(&self, settings: ::config::Config) -> Result<(), AllocationError> {
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Configuration loaded: {:?}", config);

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::allocation::StrategyKind;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("fundsplit_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_toml_file() {
        let path = temp_path("load.toml");
        std::fs::write(
            &path,
            r#"
[allocation]
strategy = "genetic"
population_size = 50
generation_count = 10
seed = 3

[data]
investors_csv = "in/investors.csv"
"#,
        )
        .unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();

        assert_eq!(config.allocation.strategy, StrategyKind::Genetic);
        assert_eq!(config.allocation.population_size, 50);
        assert_eq!(config.allocation.seed, Some(3));
        assert_eq!(config.data.investors_csv, std::path::PathBuf::from("in/investors.csv"));
        assert_eq!(config.data.products_csv, std::path::PathBuf::from("data/products.csv"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = temp_path("invalid.toml");
        std::fs::write(&path, "[allocation]\nmutation_rate = 3.0\n").unwrap();

        let manager = ConfigManager::new();
        assert!(manager.load_from_file(&path).is_err());
        assert_eq!(manager.get().allocation.mutation_rate, 0.05);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.toml");
        let manager = ConfigManager::new();
        manager
            .update(|config| config.allocation.generation_count = 42)
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get().allocation.generation_count, 42);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_update_rejects_invalid_change() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.allocation.population_size = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().allocation.population_size, 200);
    }
}
