//! Per-individual scores and the population report.

use crate::structure::DecodedStructure;
use serde::{Deserialize, Serialize};

/// Why an individual scored zero compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Failure {
    /// Fewer than three distinct x positions; never analysed.
    Degenerate,
    /// The solver could not invert the stiffness system.
    Singular,
    /// The solver rejected the structure description.
    InvalidTopology,
    /// A displacement was non-finite or beyond the sanity bound.
    NumericBlowup,
    /// The midpoint did not move at all.
    ZeroDisplacement,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Failure::Degenerate => "degenerate topology",
            Failure::Singular => "solver singularity",
            Failure::InvalidTopology => "invalid topology",
            Failure::NumericBlowup => "numeric blow-up",
            Failure::ZeroDisplacement => "zero displacement",
        };
        f.write_str(label)
    }
}

/// Evaluation record of one individual.
///
/// Kept together so that the structure, its compliance and its final
/// fitness cannot drift apart when the population is reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualScore {
    /// Decoded structure, `None` when degenerate.
    pub structure: Option<DecodedStructure>,
    /// `w_ref / w`, zero on failure.
    pub compliance: f64,
    /// `max_x - min_x`, the beam span behind `w_ref`. Zero when degenerate.
    pub span: f64,
    /// Rightmost node x, the length squared in the fitness. Zero when
    /// degenerate.
    pub length: f64,
    /// Active gene count, zero when degenerate.
    pub element_count: usize,
    /// Reason for a zero compliance.
    pub failure: Option<Failure>,
    /// Normalised element-economy term.
    pub economy: f64,
    /// Combined fitness `compliance * length² / 5 + economy`.
    pub fitness: f64,
}

impl IndividualScore {
    /// Whether the individual was analysed successfully.
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }
}

/// Scores of a whole population, in population order.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessReport {
    scores: Vec<IndividualScore>,
}

impl FitnessReport {
    pub(crate) fn new(scores: Vec<IndividualScore>) -> Self {
        Self { scores }
    }

    /// Per-individual records.
    pub fn scores(&self) -> &[IndividualScore] {
        &self.scores
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Combined fitness vector.
    pub fn fitness(&self) -> Vec<f64> {
        self.scores.iter().map(|s| s.fitness).collect()
    }

    /// Raw compliance vector.
    pub fn compliance(&self) -> Vec<f64> {
        self.scores.iter().map(|s| s.compliance).collect()
    }

    /// Index of the fittest individual (first on ties), `None` when empty.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, score) in self.scores.iter().enumerate() {
            match best {
                Some((_, f)) if score.fitness <= f => {}
                _ => best = Some((idx, score.fitness)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Record of the fittest individual.
    pub fn best(&self) -> Option<&IndividualScore> {
        self.best_index().map(|idx| &self.scores[idx])
    }

    /// Mean combined fitness, zero when empty.
    pub fn mean_fitness(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().map(|s| s.fitness).sum::<f64>() / self.scores.len() as f64
    }

    /// Number of successfully analysed individuals.
    pub fn valid_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_valid()).count()
    }
}
