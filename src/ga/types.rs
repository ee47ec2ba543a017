//! Chromosome and population types.
//!
//! A [`Genome`] holds one bit per candidate edge: "this edge is present in
//! the left half, and its mirror in the right half". A [`Population`] is the
//! ordered set of genomes evolved each generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-length boolean chromosome.
///
/// # Examples
///
/// ```
/// use truss_ga::ga::Genome;
///
/// let genome = Genome::new(vec![true, false, true]);
/// assert_eq!(genome.len(), 3);
/// assert_eq!(genome.count_active(), 2);
/// assert_eq!(genome.active_indices().collect::<Vec<_>>(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    genes: Vec<bool>,
}

impl Genome {
    /// Creates a genome from raw genes.
    pub fn new(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Draws every gene from a fair coin.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..len).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// Number of genes `M`.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gene values.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Mutable gene values.
    pub fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }

    /// Indices of set genes, ascending.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(idx, &on)| on.then_some(idx))
    }

    /// Number of set genes (the element count, not doubled for mirrors).
    pub fn count_active(&self) -> usize {
        self.genes.iter().filter(|&&on| on).count()
    }
}

/// Ordered collection of genomes of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    genomes: Vec<Genome>,
}

impl Population {
    /// Wraps existing genomes.
    pub fn new(genomes: Vec<Genome>) -> Self {
        Self { genomes }
    }

    /// `size` random genomes of `genome_len` genes each.
    pub fn random<R: Rng>(size: usize, genome_len: usize, rng: &mut R) -> Self {
        Self {
            genomes: (0..size).map(|_| Genome::random(genome_len, rng)).collect(),
        }
    }

    /// Number of individuals `P`.
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Genomes in population order.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Genome of individual `index`.
    pub fn get(&self, index: usize) -> Option<&Genome> {
        self.genomes.get(index)
    }

    /// Iterates genomes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Genome> {
        self.genomes.iter()
    }

    /// Consumes the population.
    pub fn into_genomes(self) -> Vec<Genome> {
        self.genomes
    }

    /// Whether every genome has exactly `len` genes.
    pub fn has_uniform_len(&self, len: usize) -> bool {
        self.genomes.iter().all(|g| g.len() == len)
    }
}
