//! Generational loop.
//!
//! [`EvolutionEngine`] owns the geometry, configuration, population and
//! random source of one run. Each [`step`](EvolutionEngine::step) goes
//! evaluation → rank selection → crossover → mutation → replacement.

use super::checkpoint::Checkpoint;
use super::config::EvolutionConfig;
use super::operators::{redraw_mutation, uniform_crossover};
use super::selection::{proportional_index, rank_selection};
use super::types::{Genome, Population};
use crate::error::Result;
use crate::fitness::{FitnessEvaluator, FitnessReport};
use crate::geometry::Geometry;
use crate::solver::StructuralSolver;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index.
    pub generation: usize,
    /// Population index of the fittest individual.
    pub best_index: usize,
    /// Fitness of the fittest individual.
    pub best_fitness: f64,
    /// Raw compliance of the fittest individual.
    pub best_compliance: f64,
    /// Mean fitness over the population.
    pub mean_fitness: f64,
    /// Individuals analysed without failure.
    pub valid_count: usize,
}

impl GenerationStats {
    /// Collects statistics from an evaluated generation.
    pub fn from_report(generation: usize, report: &FitnessReport) -> Self {
        let best_index = report.best_index().unwrap_or(0);
        let (best_fitness, best_compliance) = report
            .scores()
            .get(best_index)
            .map_or((0.0, 0.0), |s| (s.fitness, s.compliance));
        Self {
            generation,
            best_index,
            best_fitness,
            best_compliance,
            mean_fitness: report.mean_fitness(),
            valid_count: report.valid_count(),
        }
    }
}

/// Result of [`EvolutionEngine::step`].
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Statistics of the evaluated generation.
    pub stats: GenerationStats,
    /// Full evaluation of the generation.
    pub report: FitnessReport,
    /// Genome of the fittest individual.
    pub best_genome: Genome,
}

/// Evolution context for one run.
///
/// # Usage
///
/// ```
/// use truss_ga::ga::{EvolutionConfig, EvolutionEngine};
/// use truss_ga::solver::FrameSolver;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(10)
///     .with_seed(42);
/// let mut engine = EvolutionEngine::new(config, FrameSolver::default()).unwrap();
/// let outcome = engine.step().unwrap();
/// assert_eq!(outcome.stats.generation, 0);
/// assert_eq!(engine.generation(), 1);
/// assert_eq!(engine.population().len(), 10);
/// ```
pub struct EvolutionEngine<S, R = StdRng> {
    config: EvolutionConfig,
    geometry: Geometry,
    population: Population,
    evaluator: FitnessEvaluator<S>,
    rng: R,
    generation: usize,
}

impl<S: StructuralSolver> EvolutionEngine<S, StdRng> {
    /// Starts a run with a random population.
    ///
    /// The generator is seeded from `config.seed`, or from entropy when unset.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) for an invalid configuration.
    pub fn new(config: EvolutionConfig, solver: S) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::with_rng(config, solver, rng)
    }

    /// Resumes a run from a checkpoint.
    ///
    /// The generator is reseeded from `config.seed` offset by the stored
    /// generation, or from entropy when unset.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) when the checkpoint fails [`Checkpoint::validate`].
    pub fn from_checkpoint(checkpoint: Checkpoint, solver: S) -> Result<Self> {
        let seed = checkpoint
            .config
            .seed
            .map(|s| s.wrapping_add(checkpoint.generation as u64))
            .unwrap_or_else(rand::random);
        Self::resume_with_rng(checkpoint, solver, StdRng::seed_from_u64(seed))
    }
}

impl<S: StructuralSolver, R: Rng> EvolutionEngine<S, R> {
    /// Starts a run drawing every random decision from `rng`.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) for an invalid configuration.
    pub fn with_rng(config: EvolutionConfig, solver: S, mut rng: R) -> Result<Self> {
        config.validate()?;
        let geometry = Geometry::generate(config.length, config.height)?;
        let population = Population::random(config.population_size, geometry.genome_len(), &mut rng);
        Ok(Self {
            evaluator: FitnessEvaluator::new(solver).with_parallel(config.parallel),
            config,
            geometry,
            population,
            rng,
            generation: 0,
        })
    }

    /// Resumes from `checkpoint` with an explicit generator.
    ///
    /// # Errors
    /// [`ConfigError`](crate::error::ConfigError) when the checkpoint fails [`Checkpoint::validate`].
    pub fn resume_with_rng(checkpoint: Checkpoint, solver: S, rng: R) -> Result<Self> {
        checkpoint.validate()?;
        let Checkpoint {
            generation,
            config,
            geometry,
            population,
        } = checkpoint;
        Ok(Self {
            evaluator: FitnessEvaluator::new(solver).with_parallel(config.parallel),
            config,
            geometry,
            population,
            rng,
            generation,
        })
    }

    /// Run configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Shared lattice and candidate edges.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Index of the current population.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness evaluator in use.
    pub fn evaluator(&self) -> &FitnessEvaluator<S> {
        &self.evaluator
    }

    /// Scores the current population without advancing.
    ///
    /// # Errors
    /// Propagates solver infrastructure failures.
    pub fn evaluate(&self) -> Result<FitnessReport> {
        self.evaluator.evaluate(&self.population, &self.geometry)
    }

    /// Replaces the population with the offspring of `fitness`.
    ///
    /// `fitness[i]` must be the fitness of individual `i` of the current
    /// population. Advances the generation counter.
    ///
    /// # Panics
    /// Panics if `fitness.len()` differs from the population size.
    pub fn evolve(&mut self, fitness: &[f64]) {
        assert_eq!(
            fitness.len(),
            self.population.len(),
            "fitness vector must cover the population"
        );

        let size = self.population.len();
        let picks = rank_selection(fitness, size, &mut self.rng);
        let pool: Vec<(&Genome, f64)> = picks
            .iter()
            .map(|&idx| (&self.population.genomes()[idx], fitness[idx]))
            .collect();
        let pool_fitness: Vec<f64> = pool.iter().map(|&(_, f)| f).collect();

        let mut next = Vec::with_capacity(size);
        for &(parent, _) in &pool {
            let mut child = if self.rng.random_bool(self.config.crossover_rate) {
                let mate = pool[proportional_index(&pool_fitness, &mut self.rng)].0;
                uniform_crossover(parent, mate, &mut self.rng)
            } else {
                parent.clone()
            };
            redraw_mutation(&mut child, self.config.mutation_rate, &mut self.rng);
            next.push(child);
        }

        self.population = Population::new(next);
        self.generation += 1;
    }

    /// Evaluates the current generation, then breeds the next one.
    ///
    /// # Errors
    /// Propagates solver infrastructure failures; the population is left
    /// untouched in that case.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let report = self.evaluate()?;
        let stats = GenerationStats::from_report(self.generation, &report);
        let best_genome = self
            .population
            .get(stats.best_index)
            .cloned()
            .unwrap_or_else(|| Genome::new(vec![false; self.geometry.genome_len()]));

        debug!(
            "generation {}: mean fitness {:.4}, best uses {} genes",
            stats.generation,
            stats.mean_fitness,
            best_genome.count_active()
        );

        self.evolve(&report.fitness());
        Ok(StepOutcome {
            stats,
            report,
            best_genome,
        })
    }

    /// Snapshot of the current (not yet evaluated) generation.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            generation: self.generation,
            config: self.config.clone(),
            geometry: self.geometry.clone(),
            population: self.population.clone(),
        }
    }
}

impl<S, R> std::fmt::Debug for EvolutionEngine<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("population_size", &self.population.len())
            .field("genome_len", &self.geometry.genome_len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{NodeDisplacement, Solution, SolveFailure, SolveOutcome};
    use crate::structure::DecodedStructure;

    struct Constant;

    impl StructuralSolver for Constant {
        fn solve(&self, structure: &DecodedStructure) -> SolveOutcome {
            let d = NodeDisplacement {
                uy: -0.01,
                ..NodeDisplacement::default()
            };
            Ok(Solution::new(vec![d; structure.nodes().len()], 5000.0))
        }
    }

    struct Singular;

    impl StructuralSolver for Singular {
        fn solve(&self, _: &DecodedStructure) -> SolveOutcome {
            Err(SolveFailure::Singular)
        }
    }

    fn small_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(30)
            .with_seed(42)
    }

    // ---- Construction ----

    #[test]
    fn test_new_population_shape() {
        let engine = EvolutionEngine::new(small_config(), Constant).unwrap();
        assert_eq!(engine.population().len(), 30);
        assert!(engine
            .population()
            .has_uniform_len(engine.geometry().genome_len()));
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config().with_span(3, 5);
        assert!(EvolutionEngine::new(config, Constant).is_err());
    }

    // ---- Evolution ----

    #[test]
    fn test_step_keeps_population_shape() {
        let mut engine = EvolutionEngine::new(small_config(), Constant).unwrap();
        for expected in 0..5 {
            let outcome = engine.step().unwrap();
            assert_eq!(outcome.stats.generation, expected);
            assert_eq!(outcome.report.len(), 30);
            assert_eq!(engine.population().len(), 30);
            assert!(engine
                .population()
                .has_uniform_len(engine.geometry().genome_len()));
        }
        assert_eq!(engine.generation(), 5);
    }

    #[test]
    fn test_all_singular_still_breeds() {
        let mut engine = EvolutionEngine::new(small_config(), Singular).unwrap();
        let outcome = engine.step().unwrap();
        assert!(outcome.report.fitness().iter().all(|&f| f == 0.0));
        assert_eq!(outcome.stats.valid_count, 0);
        assert_eq!(engine.population().len(), 30);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let mut a = EvolutionEngine::new(small_config(), Constant).unwrap();
        let mut b = EvolutionEngine::new(small_config(), Constant).unwrap();
        for _ in 0..3 {
            let sa = a.step().unwrap().stats;
            let sb = b.step().unwrap().stats;
            assert_eq!(sa, sb);
        }
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn test_no_crossover_no_mutation_copies_pool() {
        let config = small_config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut engine = EvolutionEngine::new(config, Constant).unwrap();
        let before = engine.population().clone();
        engine.evolve(&vec![1.0; 30]);
        for genome in engine.population().iter() {
            assert!(before.genomes().contains(genome));
        }
    }

    #[test]
    fn test_selection_pressure_concentrates_best() {
        let config = small_config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut engine = EvolutionEngine::new(config, Constant).unwrap();
        let champion = engine.population().genomes()[7].clone();
        let worst = engine.population().genomes()[3].clone();
        let mut fitness = vec![1.0; 30];
        fitness[7] = 100.0;
        fitness[3] = 0.0;
        engine.evolve(&fitness);
        let count = |g: &Genome| engine.population().iter().filter(|x| *x == g).count();
        assert!(count(&champion) > 0);
        assert!(count(&champion) >= count(&worst));
    }

    #[test]
    #[should_panic(expected = "fitness vector must cover")]
    fn test_evolve_length_mismatch() {
        let mut engine = EvolutionEngine::new(small_config(), Constant).unwrap();
        engine.evolve(&[1.0]);
    }

    // ---- Checkpoint ----

    #[test]
    fn test_checkpoint_resume_continues_numbering() {
        let mut engine = EvolutionEngine::new(small_config(), Constant).unwrap();
        engine.step().unwrap();
        engine.step().unwrap();
        let cp = engine.checkpoint();
        assert_eq!(cp.generation, 2);

        let mut resumed = EvolutionEngine::from_checkpoint(cp.clone(), Constant).unwrap();
        assert_eq!(resumed.generation(), 2);
        assert_eq!(resumed.population(), &cp.population);
        assert_eq!(resumed.step().unwrap().stats.generation, 2);
    }

    #[test]
    fn test_resume_rejects_tampered_checkpoint() {
        let engine = EvolutionEngine::new(small_config(), Constant).unwrap();
        let mut cp = engine.checkpoint();
        cp.config.population_size = 31;
        assert!(EvolutionEngine::from_checkpoint(cp, Constant).is_err());
    }
}
