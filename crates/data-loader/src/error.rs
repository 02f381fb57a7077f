//! Error types for the data-loader crate.
//!
//! Covers reading and writing catalog snapshot files.

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading or saving a catalog snapshot
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not a JSON array of movie records
    #[error("Malformed catalog JSON in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records in one snapshot share an id
    #[error("Duplicate movie id {id} in {file}")]
    DuplicateId { file: String, id: MovieId },

    /// A record broke one of the per-record rules
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: MovieId, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
