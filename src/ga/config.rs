//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter settable at initialization.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for the truss evolution engine.
///
/// # Defaults
///
/// ```
/// use truss_ga::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 600);
/// assert!((config.crossover_rate - 0.8).abs() < 1e-12);
/// assert!((config.mutation_rate - 0.0001).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use truss_ga::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_span(10, 3)
///     .with_population_size(200)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Total span of the structure. The mirror line sits at `length / 2`.
    pub length: u32,

    /// Maximum vertical extent. Must be smaller than `length`.
    pub height: u32,

    /// Number of individuals per generation.
    pub population_size: usize,

    /// Probability that a pool member is recombined with a second parent.
    pub crossover_rate: f64,

    /// Per-gene probability of being redrawn.
    pub mutation_rate: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            length: 10,
            height: 3,
            population_size: 600,
            crossover_rate: 0.8,
            mutation_rate: 0.0001,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets span length and height.
    pub fn with_span(mut self, length: u32, height: u32) -> Self {
        self.length = length;
        self.height = height;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height >= self.length {
            return Err(ConfigError::HeightNotBelowLength {
                length: self.length,
                height: self.height,
            });
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}
