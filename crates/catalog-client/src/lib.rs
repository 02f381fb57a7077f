//! Catalog fetching for the swipe engine.
//!
//! This crate supplies movie records to the engine. It handles:
//! - The `CatalogFetcher` boundary the engine depends on
//! - A TMDB client that resolves genres, director and top-billed cast
//! - A snapshot-backed fetcher for offline sessions and tests
//!
//! Every fetcher returns whole batches: either all pages in the range are
//! resolved, or the call fails and nothing is returned.

use async_trait::async_trait;

use data_loader::MovieRecord;

pub mod error;
pub mod snapshot;
pub mod tmdb;

pub use error::{FetchError, Result};
pub use snapshot::SnapshotCatalog;
pub use tmdb::{MAX_PAGE, TmdbClient, TmdbSettings};

/// Source of movie records, addressed by page.
///
/// ## Contract
/// - Pages are requested as an inclusive range; page 0 is skipped
/// - Every record carries resolved genres, director and actors
/// - A batch never contains the same id twice
/// - Failure returns an error and no records
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Returns the name of this fetcher (for logging/debugging)
    fn name(&self) -> &str;

    async fn fetch_batch(&self, range_start: u32, range_end: u32) -> Result<Vec<MovieRecord>>;
}
