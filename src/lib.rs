//! Genetic-algorithm topology search for symmetric 2D trusses.
//!
//! A truss is encoded as one boolean per candidate member of the left half
//! of an integer lattice; every active member is mirrored about the centre
//! line, so all designs are symmetric by construction. Each design carries a
//! downward point load at mid-span between a hinged and a roller support and
//! is scored by how little it deflects relative to a simply supported beam
//! of the same span, plus a bonus for using few members.
//!
//! # Modules
//!
//! - [`geometry`]: lattice points and candidate edges
//! - [`structure`]: genome decoding, supports and load placement
//! - [`solver`]: the structural analysis contract and a direct-stiffness
//!   frame solver
//! - [`fitness`]: compliance, economy and combined fitness
//! - [`ga`]: genomes, selection, crossover, mutation and the evolution engine
//! - [`driver`]: bounded runs with progress logging, checkpoints and
//!   visualisation hooks
//! - [`error`]: configuration and run errors
//!
//! # Example
//!
//! ```
//! use truss_ga::ga::{EvolutionConfig, EvolutionEngine};
//! use truss_ga::solver::FrameSolver;
//!
//! let config = EvolutionConfig::default()
//!     .with_population_size(12)
//!     .with_seed(7);
//! let mut engine = EvolutionEngine::new(config, FrameSolver::default()).unwrap();
//! for _ in 0..3 {
//!     let outcome = engine.step().unwrap();
//!     assert!(outcome.stats.best_fitness >= 0.0);
//! }
//! ```

pub mod driver;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod geometry;
pub mod solver;
pub mod structure;

pub use error::{ConfigError, Result, TrussGaError};
