use crate::engines::allocation::context::AllocationContext;
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::hard_boundary::PenaltySchedule;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether lower or higher fitness is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimisationMode {
    Minimise,
    Maximise,
}

impl OptimisationMode {
    /// Strictly better.
    pub fn is_better(&self, candidate: f64, current: f64) -> bool {
        match self {
            OptimisationMode::Minimise => candidate < current,
            OptimisationMode::Maximise => candidate > current,
        }
    }

    /// Better or equal.
    pub fn is_at_least_as_good(&self, candidate: f64, current: f64) -> bool {
        match self {
            OptimisationMode::Minimise => candidate <= current,
            OptimisationMode::Maximise => candidate >= current,
        }
    }
}

/// Fixed-size set of chromosomes. Slots carry no ordering; ranking is done on demand
/// from the cached fitness values.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    mode: OptimisationMode,
}

impl Population {
    /// # Panics
    ///
    /// Panics if `chromosomes` is empty. Ranking always needs at least one member.
    pub fn new(chromosomes: Vec<Chromosome>, mode: OptimisationMode) -> Self {
        assert!(!chromosomes.is_empty(), "population must not be empty");
        Self { chromosomes, mode }
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn mode(&self) -> OptimisationMode {
        self.mode
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    pub fn get(&self, index: usize) -> &Chromosome {
        &self.chromosomes[index]
    }

    /// Index of the best chromosome. Ties go to the later slot.
    pub fn fittest_index(&self) -> usize {
        let mut best = 0;
        for (idx, chromosome) in self.chromosomes.iter().enumerate().skip(1) {
            if self.mode.is_at_least_as_good(chromosome.fitness(), self.chromosomes[best].fitness()) {
                best = idx;
            }
        }
        best
    }

    pub fn fittest(&self) -> &Chromosome {
        &self.chromosomes[self.fittest_index()]
    }

    /// Index of the best chromosome other than [`Population::fittest_index`].
    /// Falls back to the fittest itself in a population of one.
    pub fn second_fittest_index(&self) -> usize {
        let first = self.fittest_index();
        let mut second: Option<usize> = None;
        for (idx, chromosome) in self.chromosomes.iter().enumerate() {
            if idx == first {
                continue;
            }
            match second {
                Some(current)
                    if !self
                        .mode
                        .is_at_least_as_good(chromosome.fitness(), self.chromosomes[current].fitness()) => {}
                _ => second = Some(idx),
            }
        }
        second.unwrap_or(first)
    }

    pub fn second_fittest(&self) -> &Chromosome {
        &self.chromosomes[self.second_fittest_index()]
    }

    /// Index of the worst chromosome. Ties go to the later slot.
    pub fn least_fit_index(&self) -> usize {
        let mut worst = 0;
        for (idx, chromosome) in self.chromosomes.iter().enumerate().skip(1) {
            if self.mode.is_at_least_as_good(self.chromosomes[worst].fitness(), chromosome.fitness()) {
                worst = idx;
            }
        }
        worst
    }

    pub fn replace(&mut self, index: usize, chromosome: Chromosome) -> Chromosome {
        std::mem::replace(&mut self.chromosomes[index], chromosome)
    }

    /// Recomputes every cached fitness. Chromosomes are independent, so this runs on the rayon pool.
    pub fn evaluate_all(&mut self, context: &AllocationContext, penalty: &PenaltySchedule) {
        self.chromosomes
            .par_iter_mut()
            .for_each(|chromosome| {
                chromosome.evaluate(context, penalty);
            });
    }

    pub fn valid_count(&self) -> usize {
        self.chromosomes.iter().filter(|c| c.is_valid()).count()
    }
}
