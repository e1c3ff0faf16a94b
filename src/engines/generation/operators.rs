use crate::engines::allocation::context::{AllocationContext, UNASSIGNED};
use crate::engines::generation::chromosome::{Chromosome, ChromosomeFactory};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Values a mutated gene may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPool {
    /// Real investor indices only. Mutation can move an investment but never un-assign it.
    InvestorsOnly,
    /// Investor indices plus the unassigned sentinel.
    WithUnassigned,
}

impl MutationPool {
    pub fn values(&self, context: &AllocationContext) -> Vec<i32> {
        let mut values: Vec<i32> = (0..context.investor_count() as i32).collect();
        if *self == MutationPool::WithUnassigned {
            values.push(UNASSIGNED);
        }
        values
    }
}

/// Uniform crossover: each gene copied from either parent with equal probability.
pub fn uniform_crossover<R: Rng>(
    father: &Chromosome,
    mother: &Chromosome,
    factory: &ChromosomeFactory,
    context: &AllocationContext,
    rng: &mut R,
) -> Chromosome {
    let mut offspring = factory.empty(context);
    let len = offspring.len().min(father.len()).min(mother.len());

    for i in 0..len {
        let gene = if rng.gen::<f64>() < 0.5 {
            father.gene(i)
        } else {
            mother.gene(i)
        };
        offspring.set_gene(i, gene);
    }

    offspring
}

/// Mutation: each gene, with probability `mutation_rate`, is replaced by a
/// different value drawn uniformly from `pool`. Genes with no alternative in
/// the pool are left alone. Returns how many genes changed.
pub fn mutate<R: Rng>(
    chromosome: &mut Chromosome,
    mutation_rate: f64,
    pool: &[i32],
    rng: &mut R,
) -> usize {
    let mut mutated = 0;

    for i in 0..chromosome.len() {
        if rng.gen::<f64>() >= mutation_rate {
            continue;
        }

        let old = chromosome.gene(i);
        let candidates: Vec<i32> = pool.iter().copied().filter(|&v| v != old).collect();
        if candidates.is_empty() {
            continue;
        }

        chromosome.set_gene(i, candidates[rng.gen_range(0..candidates.len())]);
        mutated += 1;
    }

    mutated
}
