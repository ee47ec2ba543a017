//! Population scoring.

use super::types::{Failure, FitnessReport, IndividualScore};
use crate::error::{Result, TrussGaError};
use crate::ga::{Genome, Population};
use crate::geometry::Geometry;
use crate::solver::{Solution, SolveFailure, StructuralSolver};
use crate::structure::{build, BuildOutcome, DecodedStructure, LOAD_MAGNITUDE};
use log::{trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest displacement component accepted from the solver.
pub const SANITY_BOUND: f64 = 1e9;

/// Scale applied to the normalised economy term.
pub const ECONOMY_SCALE: f64 = 10.0;

/// Divisor of the length-weighted compliance term.
pub const COMPLIANCE_DIVISOR: f64 = 5.0;

/// Value substituted for every entry when [`normalize`] sees no spread.
pub const FLAT_NORMALIZED: f64 = 0.1;

/// Scores genomes by decoding them and running static analysis.
///
/// # Examples
///
/// ```
/// use truss_ga::fitness::FitnessEvaluator;
/// use truss_ga::ga::{Genome, Population};
/// use truss_ga::geometry::Geometry;
/// use truss_ga::solver::FrameSolver;
///
/// let geometry = Geometry::generate(10, 3).unwrap();
/// let population = Population::new(vec![Genome::new(vec![false; geometry.genome_len()])]);
/// let report = FitnessEvaluator::new(FrameSolver::default())
///     .evaluate(&population, &geometry)
///     .unwrap();
/// assert_eq!(report.fitness(), vec![0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<S> {
    solver: S,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<S: StructuralSolver> FitnessEvaluator<S> {
    /// Creates an evaluator around `solver`. Parallel by default.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            parallel: true,
        }
    }

    /// Enables or disables parallel analysis.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The wrapped solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Decodes and analyses one genome.
    ///
    /// The returned record carries compliance, span, length and element
    /// count; its
    /// economy and fitness are filled in by [`evaluate`](Self::evaluate)
    /// once the whole population is known.
    ///
    /// # Errors
    /// [`TrussGaError::Solver`] when the solver reports an infrastructure
    /// failure. Every other failure is recorded on the score.
    pub fn analyse(&self, genome: &Genome, geometry: &Geometry) -> Result<IndividualScore> {
        let structure = match build(genome, geometry) {
            BuildOutcome::Valid(structure) => structure,
            BuildOutcome::Degenerate { distinct_x } => {
                trace!("degenerate build: {distinct_x} distinct x positions");
                return Ok(IndividualScore {
                    structure: None,
                    compliance: 0.0,
                    span: 0.0,
                    length: 0.0,
                    element_count: 0,
                    failure: Some(Failure::Degenerate),
                    economy: 0.0,
                    fitness: 0.0,
                });
            }
        };

        let outcome = match self.solver.solve(&structure) {
            Ok(solution) => compliance(&structure, &solution),
            Err(SolveFailure::Singular) => Err(Failure::Singular),
            Err(SolveFailure::InvalidTopology(reason)) => {
                trace!("solver rejected structure: {reason}");
                Err(Failure::InvalidTopology)
            }
            Err(SolveFailure::Infrastructure(reason)) => {
                return Err(TrussGaError::Solver(reason));
            }
        };

        let (compliance, failure) = match outcome {
            Ok(value) => (value, None),
            Err(failure) => {
                trace!("analysis failed: {failure}");
                (0.0, Some(failure))
            }
        };

        Ok(IndividualScore {
            span: structure.span(),
            length: structure.length(),
            element_count: structure.element_count(),
            structure: Some(structure),
            compliance,
            failure,
            economy: 0.0,
            fitness: 0.0,
        })
    }

    /// Scores every individual of `population`.
    ///
    /// The report is in population order regardless of whether analysis ran
    /// in parallel.
    ///
    /// # Errors
    /// Propagates the first solver infrastructure failure.
    pub fn evaluate(&self, population: &Population, geometry: &Geometry) -> Result<FitnessReport> {
        let mut scores = self.analyse_all(population, geometry)?;

        let counts: Vec<Option<usize>> = scores
            .iter()
            .map(|s| s.is_valid().then_some(s.element_count))
            .collect();
        for (score, economy) in scores.iter_mut().zip(economy_fitness(&counts)) {
            score.economy = economy;
            score.fitness = combined_fitness(score.compliance, score.length, economy);
        }

        let report = FitnessReport::new(scores);
        if !report.is_empty() && report.valid_count() == 0 {
            warn!(
                "none of {} individuals could be analysed; all fitness is zero",
                report.len()
            );
        }
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn analyse_all(&self, population: &Population, geometry: &Geometry) -> Result<Vec<IndividualScore>> {
        if self.parallel {
            population
                .genomes()
                .par_iter()
                .map(|genome| self.analyse(genome, geometry))
                .collect()
        } else {
            self.analyse_sequential(population, geometry)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn analyse_all(&self, population: &Population, geometry: &Geometry) -> Result<Vec<IndividualScore>> {
        self.analyse_sequential(population, geometry)
    }

    fn analyse_sequential(&self, population: &Population, geometry: &Geometry) -> Result<Vec<IndividualScore>> {
        population
            .iter()
            .map(|genome| self.analyse(genome, geometry))
            .collect()
    }
}

/// Compliance fitness `w_ref / w` of a solved structure.
///
/// `w` is the vertical displacement magnitude at the loaded midpoint and
/// `w_ref = 100 L³ / (48 EI)` the simply supported beam deflection over the
/// same span.
///
/// # Errors
/// - [`Failure::NumericBlowup`] if any displacement component is non-finite
///   or exceeds [`SANITY_BOUND`], or the ratio is not a positive number
/// - [`Failure::InvalidTopology`] if the solution has no midpoint entry
/// - [`Failure::ZeroDisplacement`] if `w` is exactly zero
pub fn compliance(structure: &DecodedStructure, solution: &Solution) -> std::result::Result<f64, Failure> {
    let blown_up = solution
        .displacements()
        .iter()
        .any(|d| !d.is_finite() || d.max_abs() > SANITY_BOUND);
    if blown_up {
        return Err(Failure::NumericBlowup);
    }

    let w = solution
        .displacement(structure.midpoint())
        .ok_or(Failure::InvalidTopology)?
        .uy
        .abs();
    if w == 0.0 {
        return Err(Failure::ZeroDisplacement);
    }

    let span = structure.span();
    let w_ref = LOAD_MAGNITUDE * span.powi(3) / (48.0 * solution.flexural_rigidity());
    let ratio = w_ref / w;
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(Failure::NumericBlowup)
    }
}

/// `compliance * length² / 5 + economy`.
///
/// `length` is the rightmost node's x coordinate, not the support-to-support
/// span used for `w_ref`.
pub fn combined_fitness(compliance: f64, length: f64, economy: f64) -> f64 {
    compliance * length * length / COMPLIANCE_DIVISOR + economy
}

/// Min-max normalisation to `[0, 1]`.
///
/// When every value is close to the first (relative tolerance `1e-5`,
/// absolute `1e-8`) the range is treated as empty and every entry becomes
/// [`FLAT_NORMALIZED`].
///
/// # Examples
///
/// ```
/// use truss_ga::fitness::normalize;
///
/// assert_eq!(normalize(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize(&[5.0, 5.0]), vec![0.1, 0.1]);
/// ```
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let flat = values
        .iter()
        .all(|&v| (v - first).abs() <= 1e-8 + 1e-5 * first.abs());
    if flat {
        return vec![FLAT_NORMALIZED; values.len()];
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|&v| (v - min) / (max - min)).collect()
}

/// Economy term per individual: normalised `1 / element_count`, times 10.
///
/// Only `Some` entries with a positive count take part in normalisation;
/// every other entry scores zero.
pub fn economy_fitness(element_counts: &[Option<usize>]) -> Vec<f64> {
    let eligible: Vec<(usize, f64)> = element_counts
        .iter()
        .enumerate()
        .filter_map(|(idx, count)| match count {
            Some(n) if *n > 0 => Some((idx, 1.0 / *n as f64)),
            _ => None,
        })
        .collect();

    let inverse: Vec<f64> = eligible.iter().map(|&(_, v)| v).collect();
    let mut economy = vec![0.0; element_counts.len()];
    for ((idx, _), value) in eligible.iter().zip(normalize(&inverse)) {
        economy[*idx] = value * ECONOMY_SCALE;
    }
    economy
}
