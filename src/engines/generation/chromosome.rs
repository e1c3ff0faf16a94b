use crate::engines::allocation::context::{AllocationContext, UNASSIGNED};
use crate::engines::generation::hard_boundary::{self, PenaltySchedule};
use crate::error::AllocationError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// The closed set of chromosome encodings the engine can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromosomeKind {
    /// One gene per investment holding an investor index or [`UNASSIGNED`].
    /// Infeasible assignments are allowed and punished through fitness.
    HardBoundary,
}

impl ChromosomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChromosomeKind::HardBoundary => "hard_boundary",
        }
    }
}

impl fmt::Display for ChromosomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChromosomeKind {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "hard_boundary" | "hardboundary" => Ok(ChromosomeKind::HardBoundary),
            other => Err(AllocationError::UnsupportedVariant(other.to_string())),
        }
    }
}

/// A candidate allocation.
///
/// `genes()[i]` is the investor holding investment `i`, or [`UNASSIGNED`].
/// The fitness and validity flags are a cache: they describe the genes as
/// they were at the last [`Chromosome::evaluate`] call and go stale on any
/// `set_gene`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    kind: ChromosomeKind,
    slots: Vec<i32>,
    fitness: f64,
    valid: bool,
}

impl Chromosome {
    pub fn with_genes(kind: ChromosomeKind, slots: Vec<i32>) -> Self {
        Self {
            kind,
            slots,
            fitness: 0.0,
            valid: true,
        }
    }

    /// Offspring shell: every gene unassigned until filled from the parents.
    pub fn empty(kind: ChromosomeKind, len: usize) -> Self {
        Self::with_genes(kind, vec![UNASSIGNED; len])
    }

    pub fn kind(&self) -> ChromosomeKind {
        self.kind
    }

    pub fn genes(&self) -> &[i32] {
        &self.slots
    }

    pub fn gene(&self, index: usize) -> i32 {
        self.slots[index]
    }

    pub fn set_gene(&mut self, index: usize, gene: i32) {
        self.slots[index] = gene;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// False if the last evaluation found an investor holding something they never wished for.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Recomputes and caches fitness. Returns the new value.
    pub fn evaluate(&mut self, context: &AllocationContext, penalty: &PenaltySchedule) -> f64 {
        let evaluation = match self.kind {
            ChromosomeKind::HardBoundary => hard_boundary::evaluate(&self.slots, context, penalty),
        };
        self.fitness = evaluation.fitness;
        self.valid = evaluation.valid;
        self.fitness
    }
}

/// Builds chromosomes of one encoding against one context.
#[derive(Debug, Clone, Copy)]
pub struct ChromosomeFactory {
    kind: ChromosomeKind,
}

impl ChromosomeFactory {
    pub fn new(kind: ChromosomeKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ChromosomeKind {
        self.kind
    }

    /// Every gene drawn uniformly from the investor indices plus the unassigned sentinel.
    pub fn random<R: Rng>(&self, context: &AllocationContext, rng: &mut R) -> Chromosome {
        match self.kind {
            ChromosomeKind::HardBoundary => {
                let values = context.gene_values();
                let slots = (0..context.investment_count())
                    .map(|_| values[rng.gen_range(0..values.len())])
                    .collect();
                Chromosome::with_genes(self.kind, slots)
            }
        }
    }

    pub fn empty(&self, context: &AllocationContext) -> Chromosome {
        match self.kind {
            ChromosomeKind::HardBoundary => Chromosome::empty(self.kind, context.investment_count()),
        }
    }
}
