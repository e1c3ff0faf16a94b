use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::generation::{MutationPool, OptimisationMode};
use crate::error::AllocationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Greedy,
    Genetic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub strategy: StrategyKind,
    pub population_size: usize,
    pub generation_count: usize,
    pub mutation_rate: f64,
    pub optimisation_mode: OptimisationMode,
    /// Encoding name, resolved when the genetic allocator is built.
    pub chromosome: String,
    pub mutation_pool: MutationPool,
    pub penalty_base: f64,
    pub penalty_increment: f64,
    pub seed: Option<u64>,
    pub time_limit_secs: Option<u64>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Greedy,
            population_size: 200,
            generation_count: 200,
            mutation_rate: 0.05,
            optimisation_mode: OptimisationMode::Minimise,
            chromosome: "hard_boundary".to_string(),
            mutation_pool: MutationPool::InvestorsOnly,
            penalty_base: -5000.0,
            penalty_increment: -5000.0,
            seed: None,
            time_limit_secs: None,
        }
    }
}

impl ConfigSection for AllocationConfig {
    fn section_name() -> &'static str {
        "allocation"
    }

    fn validate(&self) -> Result<(), AllocationError> {
        if self.population_size < 2 {
            return Err(AllocationError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.generation_count < 1 {
            return Err(AllocationError::Configuration(
                "Generation count must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(AllocationError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if !self.penalty_base.is_finite() || !self.penalty_increment.is_finite() {
            return Err(AllocationError::Configuration(
                "Penalty values must be finite".to_string()
            ));
        }
        if self.penalty_base > 0.0 || self.penalty_increment > 0.0 {
            return Err(AllocationError::Configuration(
                "Penalty values must not be positive".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Allocation".to_string(),
            fields: vec![
                FieldManifest::new(
                    "strategy",
                    "enum(greedy, genetic)",
                    serde_json::json!("greedy"),
                    "Allocation strategy to run",
                ),
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(200),
                    "Number of chromosomes in the genetic population",
                )
                .with_range(2.0, 100000.0),
                FieldManifest::new(
                    "generation_count",
                    "integer",
                    serde_json::json!(200),
                    "Generations the genetic search runs for",
                )
                .with_range(1.0, 1000000.0),
                FieldManifest::new(
                    "mutation_rate",
                    "float",
                    serde_json::json!(0.05),
                    "Per-gene mutation probability",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "optimisation_mode",
                    "enum(minimise, maximise)",
                    serde_json::json!("minimise"),
                    "Whether lower or higher fitness wins",
                ),
                FieldManifest::new(
                    "chromosome",
                    "string",
                    serde_json::json!("hard_boundary"),
                    "Chromosome encoding",
                ),
                FieldManifest::new(
                    "mutation_pool",
                    "enum(investors_only, with_unassigned)",
                    serde_json::json!("investors_only"),
                    "Values a mutated gene may take",
                ),
                FieldManifest::new(
                    "penalty_base",
                    "float",
                    serde_json::json!(-5000.0),
                    "Average yield given to the first infeasible investor",
                ),
                FieldManifest::new(
                    "penalty_increment",
                    "float",
                    serde_json::json!(-5000.0),
                    "Added to the penalty for each further infeasible investor",
                ),
                FieldManifest::new("seed", "integer?", serde_json::Value::Null, "RNG seed"),
                FieldManifest::new(
                    "time_limit_secs",
                    "integer?",
                    serde_json::Value::Null,
                    "Abort the genetic search after this many seconds",
                ),
            ],
        }
    }
}
