//! Genetic algorithm over truss connectivity.
//!
//! Each individual is a [`Genome`] of one boolean per candidate edge. A
//! generation runs through four phases:
//!
//! 1. **Selection**: the mating pool of `P` parents is drawn with
//!    replacement, weighted by `1/rank` ([`rank_selection`]).
//! 2. **Reproduction**: with probability `crossover_rate` a pool member is
//!    recombined with a second parent drawn by raw fitness
//!    ([`proportional_index`]) using [`uniform_crossover`]; otherwise it is
//!    copied.
//! 3. **Mutation**: each gene is redrawn with probability `mutation_rate`
//!    ([`redraw_mutation`]).
//! 4. **Replacement**: the children become the next population in full.
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: span, population size and rates
//! - [`EvolutionEngine`]: owns geometry, population and random source
//! - [`GenerationStats`]: per-generation progress report
//! - [`Checkpoint`]: JSON-persisted engine state for resuming a run
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

mod checkpoint;
mod config;
mod operators;
mod runner;
mod selection;
mod types;

pub use checkpoint::Checkpoint;
pub use config::EvolutionConfig;
pub use operators::{redraw_mutation, uniform_crossover};
pub use runner::{EvolutionEngine, GenerationStats, StepOutcome};
pub use selection::{proportional_index, rank_order, rank_probabilities, rank_selection};
pub use types::{Genome, Population};
