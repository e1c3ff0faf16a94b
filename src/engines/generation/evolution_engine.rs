use crate::config::allocation::AllocationConfig;
use crate::engines::allocation::context::AllocationContext;
use crate::engines::generation::{
    chromosome::{Chromosome, ChromosomeFactory, ChromosomeKind},
    hard_boundary::PenaltySchedule,
    operators::{mutate, uniform_crossover, MutationPool},
    population::{OptimisationMode, Population},
    progress::{ProgressCallback, StopSignal},
};
use crate::error::{AllocationError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Engine parameters, resolved from the user-facing [`AllocationConfig`].
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub mode: OptimisationMode,
    pub chromosome: ChromosomeKind,
    pub mutation_pool: MutationPool,
    pub penalty: PenaltySchedule,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            generations: 200,
            mutation_rate: 0.05,
            mode: OptimisationMode::Minimise,
            chromosome: ChromosomeKind::HardBoundary,
            mutation_pool: MutationPool::InvestorsOnly,
            penalty: PenaltySchedule::default(),
            seed: None,
        }
    }
}

impl TryFrom<&AllocationConfig> for EvolutionConfig {
    type Error = AllocationError;

    /// Fails with `UnsupportedVariant` if the chromosome encoding is unknown.
    fn try_from(config: &AllocationConfig) -> Result<Self> {
        Ok(Self {
            population_size: config.population_size,
            generations: config.generation_count,
            mutation_rate: config.mutation_rate,
            mode: config.optimisation_mode,
            chromosome: config.chromosome.parse()?,
            mutation_pool: config.mutation_pool,
            penalty: PenaltySchedule {
                base: config.penalty_base,
                increment: config.penalty_increment,
            },
            seed: config.seed,
        })
    }
}

/// What a finished run hands back.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Best chromosome seen at any point of the run, with the fitness it had when recorded.
    pub best: Chromosome,
    pub generations_run: usize,
    pub stopped_early: bool,
    /// Best-so-far fitness after each generation's selection step.
    pub history: Vec<f64>,
}

/// Steady-state genetic search over one allocation context.
///
/// Each generation: pick the two fittest as parents (and record the fittest
/// if it is at least as good as the best so far), breed one offspring by
/// uniform crossover, mutate every member of the population, overwrite the
/// weakest member with the offspring, re-evaluate.
pub struct GeneticEngine<'a> {
    config: EvolutionConfig,
    context: &'a AllocationContext,
    factory: ChromosomeFactory,
    mutation_pool: Vec<i32>,
    rng: StdRng,
    best: Option<Chromosome>,
}

impl<'a> GeneticEngine<'a> {
    pub fn new(config: EvolutionConfig, context: &'a AllocationContext) -> Result<Self> {
        if config.population_size == 0 {
            return Err(AllocationError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.mutation_rate) {
            return Err(AllocationError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            factory: ChromosomeFactory::new(config.chromosome),
            mutation_pool: config.mutation_pool.values(context),
            config,
            context,
            rng,
            best: None,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs the configured number of generations, or fewer if `stop` fires in between.
    pub fn run<C: ProgressCallback + ?Sized>(
        &mut self,
        callback: &mut C,
        stop: &StopSignal,
    ) -> EvolutionOutcome {
        self.best = None;
        let mut population = self.initialize_population();
        self.evaluate(&mut population);

        let mut history = Vec::with_capacity(self.config.generations);
        let mut generations_run = 0;
        let mut stopped_early = false;

        while generations_run < self.config.generations {
            if stop.should_stop() {
                log::warn!(
                    "Genetic run stopped after {} of {} generations",
                    generations_run,
                    self.config.generations
                );
                stopped_early = true;
                break;
            }

            let generation = generations_run;
            callback.on_generation_start(generation);

            let (father, mother) = self.selection(&population);
            let offspring = self.crossover(&population, father, mother);
            self.mutation(&mut population);
            self.replace_weakest(&mut population, offspring);
            self.evaluate(&mut population);

            generations_run += 1;
            let best_fitness = self.best_fitness();
            history.push(best_fitness);
            log::debug!("Generation {}: best fitness {:.4}", generation + 1, best_fitness);
            callback.on_generation_complete(generation, best_fitness, population.valid_count());
        }

        // The last evaluation has not been through selection yet.
        self.record_if_better(population.fittest());

        EvolutionOutcome {
            best: self.best.take().unwrap_or_else(|| population.fittest().clone()),
            generations_run,
            stopped_early,
            history,
        }
    }

    fn initialize_population(&mut self) -> Population {
        let chromosomes = (0..self.config.population_size)
            .map(|_| self.factory.random(self.context, &mut self.rng))
            .collect();
        Population::new(chromosomes, self.config.mode)
    }

    fn evaluate(&self, population: &mut Population) {
        population.evaluate_all(self.context, &self.config.penalty);
    }

    /// Returns the parent indices (fittest, second fittest).
    fn selection(&mut self, population: &Population) -> (usize, usize) {
        let father = population.fittest_index();
        let mother = population.second_fittest_index();
        self.record_if_better(population.get(father));
        (father, mother)
    }

    fn crossover(&mut self, population: &Population, father: usize, mother: usize) -> Chromosome {
        uniform_crossover(
            population.get(father),
            population.get(mother),
            &self.factory,
            self.context,
            &mut self.rng,
        )
    }

    /// Mutates every chromosome already in the population. The fresh offspring is not touched.
    fn mutation(&mut self, population: &mut Population) {
        let rate = self.config.mutation_rate;
        let pool = &self.mutation_pool;
        let rng = &mut self.rng;
        let mutated: usize = population
            .chromosomes_mut()
            .iter_mut()
            .map(|chromosome| mutate(chromosome, rate, pool, &mut *rng))
            .sum();
        log::trace!("Mutated {} genes", mutated);
    }

    /// Ranks on the cached fitness from the previous evaluation.
    fn replace_weakest(&self, population: &mut Population, offspring: Chromosome) {
        let weakest = population.least_fit_index();
        population.replace(weakest, offspring);
    }

    /// Ties replace the recorded best.
    fn record_if_better(&mut self, candidate: &Chromosome) {
        let replace = match &self.best {
            Some(best) => self.config.mode.is_at_least_as_good(candidate.fitness(), best.fitness()),
            None => true,
        };
        if replace {
            self.best = Some(candidate.clone());
        }
    }

    fn best_fitness(&self) -> f64 {
        self.best.as_ref().map(|b| b.fitness()).unwrap_or(f64::NAN)
    }
}
