//! Boolean-genome operators.
//!
//! - [`uniform_crossover`]: each gene from either parent by a fair coin
//! - [`redraw_mutation`]: each gene redrawn with a small probability

use super::types::Genome;
use rand::Rng;

/// Uniform crossover with a freshly drawn mask.
///
/// Gene `i` of the child comes from `parent1` when the mask bit is set and
/// from `parent2` otherwise.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> Genome {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    let genes = parent1
        .genes()
        .iter()
        .zip(parent2.genes())
        .map(|(&a, &b)| if rng.random::<bool>() { a } else { b })
        .collect();
    Genome::new(genes)
}

/// Redraws each gene with probability `rate`.
///
/// A redrawn gene takes a fresh fair-coin value, so it may keep its old
/// value. Returns how many genes were redrawn.
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`.
pub fn redraw_mutation<R: Rng>(genome: &mut Genome, rate: f64, rng: &mut R) -> usize {
    if rate <= 0.0 {
        return 0;
    }
    let mut redrawn = 0;
    for gene in genome.genes_mut() {
        if rng.random_bool(rate) {
            *gene = rng.random::<bool>();
            redrawn += 1;
        }
    }
    redrawn
}
