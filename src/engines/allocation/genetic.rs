use crate::config::allocation::AllocationConfig;
use crate::engines::allocation::context::AllocationContext;
use crate::engines::allocation::strategy::{validate_inputs, Allocation, AllocationResult, AllocationStrategy};
use crate::engines::generation::{
    Chromosome, ConsoleProgressCallback, EvolutionConfig, EvolutionOutcome, GeneticEngine, ProgressCallback,
    StopSignal,
};
use crate::error::Result;
use crate::types::{Investment, Investor};
use std::time::Duration;

/// Allocation by steady-state genetic search.
///
/// If nothing feasible survived the search, genes that point an investment
/// at an investor who does not want it are dropped at decode time and the
/// investment is reported as unused.
#[derive(Debug, Clone)]
pub struct GeneticAllocator {
    config: EvolutionConfig,
    time_limit: Option<Duration>,
}

impl GeneticAllocator {
    pub fn new(config: EvolutionConfig) -> Self {
        Self {
            config,
            time_limit: None,
        }
    }

    /// Fails with `UnsupportedVariant` for an unknown chromosome encoding.
    pub fn from_config(config: &AllocationConfig) -> Result<Self> {
        Ok(Self {
            config: EvolutionConfig::try_from(config)?,
            time_limit: config.time_limit_secs.map(Duration::from_secs),
        })
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Full run with caller-supplied progress reporting and cancellation.
    pub fn allocate_with<C: ProgressCallback + ?Sized>(
        &self,
        investors: &[Investor],
        investments: &[Investment],
        callback: &mut C,
        stop: &StopSignal,
    ) -> Result<(AllocationResult, EvolutionOutcome)> {
        validate_inputs(investors, investments)?;
        log::info!(
            "Genetic allocation started: {} investors, {} investments, population {}, {} generations",
            investors.len(),
            investments.len(),
            self.config.population_size,
            self.config.generations
        );

        let context = AllocationContext::new(investors, investments);
        let mut engine = GeneticEngine::new(self.config.clone(), &context)?;
        let outcome = engine.run(callback, stop);

        if !outcome.best.is_valid() {
            log::warn!(
                "Best chromosome (fitness {:.4}) is infeasible; unwanted assignments are reported unused",
                outcome.best.fitness()
            );
        }

        let result = decode(&context, &outcome.best);
        log::info!(
            "Genetic allocation finished after {} generations: fitness {:.4}, {} assigned, {} unused",
            outcome.generations_run,
            outcome.best.fitness(),
            result.assigned_count(),
            result.unused().len()
        );
        Ok((result, outcome))
    }
}

impl AllocationStrategy for GeneticAllocator {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn allocate(&self, investors: &[Investor], investments: &[Investment]) -> Result<AllocationResult> {
        let stop = match self.time_limit {
            Some(limit) => StopSignal::new().with_time_limit(limit),
            None => StopSignal::new(),
        };
        let mut progress = ConsoleProgressCallback::default();
        let (result, _) = self.allocate_with(investors, investments, &mut progress, &stop)?;
        Ok(result)
    }
}

/// Turns a chromosome into per-investor holdings.
///
/// Genes not naming an investor go to unused, as do genes naming an investor
/// whose remaining wishlist no longer holds the product.
pub fn decode(context: &AllocationContext, chromosome: &Chromosome) -> AllocationResult {
    let mut investors = context.investors().to_vec();
    let mut assigned: Vec<Vec<Investment>> = vec![Vec::new(); investors.len()];
    let mut unused = Vec::new();

    for (investment, &gene) in context.investments().iter().zip(chromosome.genes()) {
        match usize::try_from(gene).ok().filter(|&idx| idx < investors.len()) {
            Some(idx) if investors[idx].remove_wish(investment.product_id()) => {
                investors[idx].add_investment(investment.clone());
                assigned[idx].push(investment.clone());
            }
            Some(idx) => {
                log::debug!(
                    "Dropping infeasible gene: {} does not want {}",
                    investors[idx].name(),
                    investment.product_id()
                );
                unused.push(investment.clone());
            }
            None => unused.push(investment.clone()),
        }
    }

    let allocations = investors
        .into_iter()
        .zip(assigned)
        .map(|(investor, investments)| Allocation { investor, investments })
        .collect();
    AllocationResult::new(allocations, unused)
}
