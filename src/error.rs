//! Error types.
//!
//! Only fatal conditions are errors: invalid configuration, a broken
//! checkpoint, or a solver that cannot run at all. Individuals that fail to
//! build or analyse are scored, not reported (see [`crate::fitness::Failure`]).

use std::path::PathBuf;

/// Invalid initialization parameters. Raised at setup and never recovered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The mirror line construction needs a span strictly wider than it is tall.
    #[error("height ({height}) must be smaller than length ({length})")]
    HeightNotBelowLength {
        /// Requested total span.
        length: u32,
        /// Requested maximum vertical extent.
        height: u32,
    },

    /// Selection needs at least two individuals.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// A probability outside `[0, 1]` or not finite.
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidRate {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The driver was asked to run zero generations.
    #[error("generations must be at least 1")]
    ZeroGenerations,

    /// A periodic interval (checkpoint, render) of zero.
    #[error("{0} must be at least 1")]
    ZeroInterval(&'static str),

    /// A checkpoint does not agree with the configuration it carries.
    #[error("checkpoint is inconsistent: {0}")]
    CheckpointMismatch(String),
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum TrussGaError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The structural solver could not run (as opposed to a singular structure).
    #[error("solver failure: {0}")]
    Solver(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrussGaError>;
