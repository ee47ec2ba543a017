//! Outer generation loop.

use super::config::RunConfig;
use super::observer::{NoopObserver, StructureObserver};
use crate::error::Result;
use crate::ga::{Checkpoint, EvolutionEngine, GenerationStats, Genome};
use crate::solver::StructuralSolver;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Fittest individual seen during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    /// Generation it was evaluated in.
    pub generation: usize,
    /// Combined fitness.
    pub fitness: f64,
    /// Raw compliance.
    pub compliance: f64,
    /// Its genome.
    pub genome: Genome,
}

/// Result of [`Driver::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Generations evaluated by this call.
    pub generations_run: usize,
    /// Generation index the engine stopped at.
    pub final_generation: usize,
    /// Best individual over the evaluated generations.
    pub best: Option<BestIndividual>,
    /// Statistics per evaluated generation.
    pub history: Vec<GenerationStats>,
}

/// Runs an [`EvolutionEngine`] for a configured number of generations,
/// reporting progress, writing checkpoints and feeding an observer.
///
/// ```
/// use truss_ga::driver::{Driver, RunConfig};
/// use truss_ga::ga::EvolutionConfig;
/// use truss_ga::solver::FrameSolver;
///
/// let config = RunConfig::default()
///     .with_evolution(EvolutionConfig::default().with_population_size(8).with_seed(1))
///     .with_generations(2)
///     .with_checkpoint_path(None::<&str>);
/// let summary = Driver::new(config, FrameSolver::default())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(summary.history.len(), 2);
/// ```
pub struct Driver<S, O = NoopObserver> {
    config: RunConfig,
    engine: EvolutionEngine<S>,
    observer: O,
}

impl<S: StructuralSolver> Driver<S, NoopObserver> {
    /// Starts a fresh run.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) for an invalid configuration.
    pub fn new(config: RunConfig, solver: S) -> Result<Self> {
        config.validate()?;
        let engine = EvolutionEngine::new(config.evolution.clone(), solver)?;
        Ok(Self {
            config,
            engine,
            observer: NoopObserver,
        })
    }

    /// Continues the run stored in `checkpoint`.
    ///
    /// Engine parameters come from the checkpoint; `config` supplies the
    /// generation target, intervals and checkpoint file.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) for an invalid
    /// configuration or inconsistent checkpoint.
    pub fn resume(mut config: RunConfig, checkpoint: Checkpoint, solver: S) -> Result<Self> {
        config.evolution = checkpoint.config.clone();
        config.validate()?;
        info!(
            "resuming at generation {} with {} individuals",
            checkpoint.generation,
            checkpoint.population.len()
        );
        let engine = EvolutionEngine::from_checkpoint(checkpoint, solver)?;
        Ok(Self {
            config,
            engine,
            observer: NoopObserver,
        })
    }
}

impl<S: StructuralSolver, O: StructureObserver> Driver<S, O> {
    /// Replaces the observer.
    pub fn with_observer<P: StructureObserver>(self, observer: P) -> Driver<S, P> {
        Driver {
            config: self.config,
            engine: self.engine,
            observer,
        }
    }

    /// Run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Underlying engine.
    pub fn engine(&self) -> &EvolutionEngine<S> {
        &self.engine
    }

    /// Evolves until the engine reaches `config.generations`.
    ///
    /// A checkpoint is written before evaluating every generation divisible
    /// by `checkpoint_every`, and once more after the last generation. The
    /// observer sees the best structure of every generation divisible by
    /// `render_every`.
    ///
    /// # Errors
    /// Solver infrastructure failures and checkpoint I/O errors.
    pub fn run(&mut self) -> Result<RunSummary> {
        let start = self.engine.generation();
        let mut best: Option<BestIndividual> = None;
        let mut history = Vec::new();

        while self.engine.generation() < self.config.generations {
            let generation = self.engine.generation();
            if generation % self.config.checkpoint_every == 0 {
                self.write_checkpoint()?;
            }

            let outcome = self.engine.step()?;
            let stats = outcome.stats;
            info!(
                "generation {}: best fitness {:.6}, compliance {:.6}, {}/{} analysable",
                stats.generation,
                stats.best_fitness,
                stats.best_compliance,
                stats.valid_count,
                outcome.report.len()
            );

            let best_score = outcome.report.scores().get(stats.best_index);
            if let Some(structure) = best_score.and_then(|s| s.structure.as_ref()) {
                debug!(
                    "best structure: {} nodes, {} elements, span {}",
                    structure.nodes().len(),
                    structure.elements().len(),
                    structure.span()
                );
                if generation % self.config.render_every == 0 {
                    self.observer.observe(generation, structure);
                }
            }

            let improved = best
                .as_ref()
                .map_or(true, |b| stats.best_fitness > b.fitness);
            if improved {
                best = Some(BestIndividual {
                    generation,
                    fitness: stats.best_fitness,
                    compliance: stats.best_compliance,
                    genome: outcome.best_genome,
                });
            }
            history.push(stats);
        }

        self.write_checkpoint()?;

        if let Some(b) = &best {
            info!(
                "best fitness {:.6} (compliance {:.6}) found in generation {}",
                b.fitness, b.compliance, b.generation
            );
        }
        Ok(RunSummary {
            generations_run: self.engine.generation() - start,
            final_generation: self.engine.generation(),
            best,
            history,
        })
    }

    fn write_checkpoint(&self) -> Result<()> {
        let Some(path) = &self.config.checkpoint_path else {
            return Ok(());
        };
        self.engine.checkpoint().save(path)?;
        info!(
            "checkpoint for generation {} written to {}",
            self.engine.generation(),
            path.display()
        );
        Ok(())
    }
}

impl<S, O> std::fmt::Debug for Driver<S, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
