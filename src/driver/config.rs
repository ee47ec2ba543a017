//! Run configuration.

use crate::error::{ConfigError, Result, TrussGaError};
use crate::ga::EvolutionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a driven run needs besides the solver.
///
/// Missing JSON fields take their defaults.
///
/// ```
/// use truss_ga::driver::RunConfig;
///
/// let config: RunConfig = serde_json::from_str(r#"{"generations": 30}"#).unwrap();
/// assert_eq!(config.generations, 30);
/// assert_eq!(config.checkpoint_every, 20);
/// assert_eq!(config.evolution.population_size, 600);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Engine parameters.
    pub evolution: EvolutionConfig,

    /// Generation index at which the run stops. A resumed run continues
    /// until the same total.
    pub generations: usize,

    /// Checkpoint interval in generations.
    pub checkpoint_every: usize,

    /// Checkpoint file. `None` disables checkpointing.
    pub checkpoint_path: Option<PathBuf>,

    /// Observer interval in generations.
    pub render_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            evolution: EvolutionConfig::default(),
            generations: 150,
            checkpoint_every: 20,
            checkpoint_path: Some(PathBuf::from("checkpoint.json")),
            render_every: 2,
        }
    }
}

impl RunConfig {
    /// Sets the engine parameters.
    pub fn with_evolution(mut self, evolution: EvolutionConfig) -> Self {
        self.evolution = evolution;
        self
    }

    /// Sets the total generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the checkpoint interval.
    pub fn with_checkpoint_every(mut self, every: usize) -> Self {
        self.checkpoint_every = every;
        self
    }

    /// Sets or clears the checkpoint file.
    pub fn with_checkpoint_path<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.checkpoint_path = path.map(Into::into);
        self
    }

    /// Sets the observer interval.
    pub fn with_render_every(mut self, every: usize) -> Self {
        self.render_every = every;
        self
    }

    /// Validates run and engine parameters.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.evolution.validate()?;
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.checkpoint_every == 0 {
            return Err(ConfigError::ZeroInterval("checkpoint_every"));
        }
        if self.render_every == 0 {
            return Err(ConfigError::ZeroInterval("render_every"));
        }
        Ok(())
    }

    /// Reads a JSON run configuration.
    ///
    /// # Errors
    /// [`TrussGaError::Io`] or [`TrussGaError::Json`]. The result is not
    /// validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TrussGaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
