//! Engine state persistence.

use super::config::EvolutionConfig;
use super::types::Population;
use crate::error::{ConfigError, Result, TrussGaError};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Snapshot of an [`EvolutionEngine`](super::EvolutionEngine).
///
/// `population` is the population of generation `generation`, before it is
/// evaluated. The random number generator is not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Index of the stored population.
    pub generation: usize,
    /// Configuration the run was started with.
    pub config: EvolutionConfig,
    /// Lattice and candidate edges.
    pub geometry: Geometry,
    /// Genomes of the stored generation.
    pub population: Population,
}

impl Checkpoint {
    /// Writes the checkpoint as pretty-printed JSON.
    ///
    /// # Errors
    /// [`TrussGaError::Io`] or [`TrussGaError::Json`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| TrussGaError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a checkpoint written by [`save`](Self::save).
    ///
    /// # Errors
    /// [`TrussGaError::Io`] or [`TrussGaError::Json`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TrussGaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Checks the snapshot against its own configuration.
    ///
    /// # Errors
    /// [`ConfigError`] when the configuration is invalid, the stored geometry
    /// differs from the one the configuration generates, or the population
    /// has the wrong size or genome length.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.config.validate()?;

        let expected = Geometry::generate(self.config.length, self.config.height)?;
        if expected != self.geometry {
            return Err(ConfigError::CheckpointMismatch(format!(
                "stored geometry does not match length {} height {}",
                self.config.length, self.config.height
            )));
        }
        if self.population.len() != self.config.population_size {
            return Err(ConfigError::CheckpointMismatch(format!(
                "population has {} individuals, expected {}",
                self.population.len(),
                self.config.population_size
            )));
        }
        if !self.population.has_uniform_len(self.geometry.genome_len()) {
            return Err(ConfigError::CheckpointMismatch(format!(
                "genome length differs from {} candidate edges",
                self.geometry.genome_len()
            )));
        }
        Ok(())
    }
}
