//! Errors that can occur while fetching catalog pages.

use thiserror::Error;

/// Errors that can occur when talking to a catalog service
///
/// None of these are fatal to a session: the caller treats a failed fetch
/// as "no new movies this cycle" and tries again on the next refill check.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure, timeout, or the task running a request died
    #[error("Catalog request failed: {0}")]
    Transient(String),

    /// The service answered with a non-success status
    #[error("Catalog service returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected shape
    #[error("Malformed catalog response: {0}")]
    Decode(String),

    /// Live fetching was requested without credentials
    #[error("No TMDB API key configured (set TMDB_API_KEY)")]
    MissingApiKey,
}

impl FetchError {
    /// True for failures worth retrying on the next refill
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_) | FetchError::Status { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transient(e.to_string())
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FetchError>;
