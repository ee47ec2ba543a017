//! Fitness evaluation.
//!
//! Every genome is decoded into a structure and analysed by a
//! [`StructuralSolver`](crate::solver::StructuralSolver). The combined
//! fitness of an individual is
//!
//! ```text
//! fitness = compliance * length² / 5 + economy
//! compliance = w_ref / w,   w_ref = 100 span³ / (48 EI)
//! economy = 10 * normalize(1 / element_count)
//! ```
//!
//! `span` is `max_x - min_x` of the decoded nodes and `length` is `max_x`.
//! They differ when the structure does not reach x = 0.
//!
//! Degenerate builds, solver singularities, numeric blow-ups and zero
//! midpoint displacement all score zero. They are recorded as a [`Failure`]
//! on the individual's score and never abort the generation.

mod evaluator;
mod types;

pub use evaluator::{
    combined_fitness, compliance, economy_fitness, normalize, FitnessEvaluator, COMPLIANCE_DIVISOR,
    ECONOMY_SCALE, FLAT_NORMALIZED, SANITY_BOUND,
};
pub use types::{Failure, FitnessReport, IndividualScore};
