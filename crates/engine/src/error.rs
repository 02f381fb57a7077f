//! Error types for the engine crate.

use data_loader::MovieId;
use thiserror::Error;

/// Feedback the pools refuse to record. Neither variant changes any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The id was never ingested
    #[error("Unknown movie: {0}")]
    UnknownMovie(MovieId),

    /// The id already has a verdict; liked and disliked stay disjoint
    #[error("Movie {0} has already been rated")]
    AlreadyRated(MovieId),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PoolError>;

/// Engine settings outside the range the engine can run with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Suggestion capacity must be at least 1")]
    ZeroCapacity,

    #[error("Pages per batch must be between 1 and {max}, got {value}")]
    PagesPerBatchOutOfRange { value: u32, max: u32 },
}
