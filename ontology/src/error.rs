//! Error types for document I/O and restriction synthesis.

use std::path::PathBuf;

use thiserror::Error;

use crate::serializer::Format;

/// Errors raised by the graph engine.
///
/// Lookups that can legitimately miss (unknown recipe ids, unmapped action
/// labels) return `Option` instead; only fatal conditions live here.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// The input document could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input document is not valid in its declared format.
    #[error("failed to parse {format} document: {message}")]
    Parse {
        /// Declared format.
        format: Format,
        /// Parser diagnostic.
        message: String,
    },

    /// The document could not be written in the requested format.
    #[error("failed to serialize {format} document: {message}")]
    Serialize {
        /// Requested format.
        format: Format,
        /// Serializer diagnostic.
        message: String,
    },

    /// The serialized document could not be written to disk.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No format could be derived from the file extension.
    #[error("cannot infer a document format from {0}")]
    UnknownFormat(PathBuf),

    /// An intersection expression was requested with no restrictions.
    #[error("an intersection expression needs at least one restriction")]
    EmptyIntersection,
}

/// Result alias for graph engine operations.
pub type Result<T> = std::result::Result<T, OntologyError>;
