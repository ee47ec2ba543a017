//! Run orchestration.
//!
//! [`Driver`] bounds the otherwise endless [`EvolutionEngine`](crate::ga::EvolutionEngine)
//! loop: it runs a fixed number of generations, logs the per-generation
//! progress report, writes periodic [`Checkpoint`](crate::ga::Checkpoint)s
//! and hands the best structure to a [`StructureObserver`].

mod config;
mod observer;
mod runner;

pub use config::RunConfig;
pub use observer::{render_ascii, NoopObserver, StructureObserver};
pub use runner::{BestIndividual, Driver, RunSummary};
