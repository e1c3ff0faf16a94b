pub mod chromosome;
pub mod hard_boundary;
pub mod operators;
pub mod population;
pub mod evolution_engine;
pub mod progress;

pub use chromosome::{Chromosome, ChromosomeFactory, ChromosomeKind};
pub use hard_boundary::{Evaluation, PenaltySchedule};
pub use operators::{mutate, uniform_crossover, MutationPool};
pub use population::{OptimisationMode, Population};
pub use evolution_engine::{EvolutionConfig, EvolutionOutcome, GeneticEngine};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, NoopProgress, ProgressCallback, ProgressMessage, StopSignal,
};
