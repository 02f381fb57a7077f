//! # Data Loader Crate
//!
//! This crate holds the movie record every other crate works with, plus
//! the catalog snapshot format used for offline sessions.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, MovieId, Verdict)
//! - **parser**: Read and write snapshot JSON files
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{parser, MovieRecord};
//! use std::path::Path;
//!
//! let movies = parser::parse_catalog(Path::new("data/popular.json"))?;
//! println!("{} movies, first is {}", movies.len(), movies[0]);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    MovieRecord,
    Verdict,
    // Constants
    MAX_ACTORS,
    UNKNOWN_DIRECTOR,
};
