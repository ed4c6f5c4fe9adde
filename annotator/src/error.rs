//! Error types for configuration and collaborator inputs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the annotator's configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `annotator.toml` is not valid TOML or has unexpected fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A JSON input (action taxonomy, precomputed actions) is malformed.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// Path of the file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A required value is empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
